//! The calendar popup's state machine.
//!
//! ```text
//!            toggle                 month control
//!  Closed ───────────▶ Days ◀──────────────────────▶ Months
//!    ▲                 │  ▲        choose month ──────┘
//!    │  toggle /       │  │
//!    │  outside press  │  └── choose year ─── Years ◀── year control
//!    └──── choose day ─┘                               (from any open view)
//! ```
//!
//! The picker knows nothing about text. It reports the dates it wants the
//! field to take; the field serializes them and emits the notification.

use chrono::{Datelike, NaiveDate};

use crate::date::calendar::{clamped_date, month_grid, shift_month, year_window, DayCell};
use crate::event::OutsideClickGuard;
use crate::geometry::Region;

/// Which view of the popup is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerView {
    Closed,
    Days,
    Months,
    Years,
}

/// Calendar popup state.
#[derive(Debug)]
pub struct Picker {
    view: PickerView,
    view_year: i32,
    view_month: u32,
    /// "Today" captured when the popup opened; anchors the year window.
    today: NaiveDate,
    /// Field plus popup, in screen cells. Outside presses are judged
    /// against it.
    area: Region,
    guard: Option<OutsideClickGuard>,
}

impl Picker {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: PickerView::Closed,
            view_year: today.year(),
            view_month: today.month(),
            today,
            area: Region::EMPTY,
            guard: None,
        }
    }

    pub fn view(&self) -> PickerView {
        self.view
    }

    pub fn is_open(&self) -> bool {
        self.view != PickerView::Closed
    }

    /// The (year, month) the day view shows.
    pub fn viewed_month(&self) -> (i32, u32) {
        (self.view_year, self.view_month)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn area(&self) -> Region {
        self.area
    }

    pub fn set_area(&mut self, area: Region) {
        self.area = area;
    }

    /// Whether an outside-click listener is attached.
    pub fn is_listening(&self) -> bool {
        self.guard.is_some()
    }

    // -----------------------------------------------------------------------
    // Open / close
    // -----------------------------------------------------------------------

    /// Open on the day view showing `seed`'s month.
    pub fn open(&mut self, seed: NaiveDate, today: NaiveDate, area: Region) {
        self.view = PickerView::Days;
        self.view_year = seed.year();
        self.view_month = seed.month();
        self.today = today;
        self.area = area;
    }

    /// Keep `guard` attached until the popup closes.
    pub fn attach(&mut self, guard: OutsideClickGuard) {
        self.guard = Some(guard);
    }

    /// Close from any view and release the outside-click listener.
    /// Returns whether the popup was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.view = PickerView::Closed;
        self.guard = None;
        was_open
    }

    // -----------------------------------------------------------------------
    // View switching
    // -----------------------------------------------------------------------

    /// Month control: Days/Years → Months, Months → Days.
    pub fn toggle_month_select(&mut self) {
        self.view = match self.view {
            PickerView::Closed => PickerView::Closed,
            PickerView::Months => PickerView::Days,
            PickerView::Days | PickerView::Years => PickerView::Months,
        };
    }

    /// Year control: Days/Months → Years, Years → Days.
    pub fn toggle_year_select(&mut self) {
        self.view = match self.view {
            PickerView::Closed => PickerView::Closed,
            PickerView::Years => PickerView::Days,
            PickerView::Days | PickerView::Months => PickerView::Years,
        };
    }

    /// Step the day view by `delta` months.
    pub fn step_month(&mut self, delta: i32) {
        if self.view != PickerView::Days {
            return;
        }
        let (year, month) = shift_month(self.view_year, self.view_month, delta);
        self.view_year = year;
        self.view_month = month;
    }

    // -----------------------------------------------------------------------
    // Selections
    // -----------------------------------------------------------------------

    /// Choose a month in the month view and return to the day view.
    ///
    /// When the field already holds `selected`, returns the date the field
    /// should move to: same day (clamped), new month, viewed year.
    pub fn choose_month(&mut self, month: u32, selected: Option<NaiveDate>) -> Option<NaiveDate> {
        if self.view != PickerView::Months || !(1..=12).contains(&month) {
            return None;
        }
        self.view_month = month;
        self.view = PickerView::Days;
        selected.and_then(|d| clamped_date(self.view_year, month, d.day()))
    }

    /// Choose a year in the year view and return to the day view.
    ///
    /// Like [`choose_month`](Self::choose_month), returns the re-synced date
    /// when the field holds one.
    pub fn choose_year(&mut self, year: i32, selected: Option<NaiveDate>) -> Option<NaiveDate> {
        if self.view != PickerView::Years || !self.year_options().contains(&year) {
            return None;
        }
        self.view_year = year;
        self.view = PickerView::Days;
        selected.and_then(|d| clamped_date(year, self.view_month, d.day()))
    }

    /// Choose a day of the viewed month. Commits and closes.
    pub fn choose_day(&mut self, day: u32) -> Option<NaiveDate> {
        if self.view != PickerView::Days {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(self.view_year, self.view_month, day)?;
        self.close();
        Some(date)
    }

    // -----------------------------------------------------------------------
    // Content
    // -----------------------------------------------------------------------

    /// Years offered by the year view; the first is ten years before today.
    pub fn year_options(&self) -> Vec<i32> {
        year_window(self.today)
    }

    /// The day grid for the viewed month.
    pub fn day_cells(&self) -> Vec<DayCell> {
        month_grid(self.view_year, self.view_month)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
