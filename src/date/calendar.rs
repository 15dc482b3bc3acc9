//! Calendar arithmetic for the date picker: today's date, the year window,
//! month grids and the locale strings shown in the popup.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Years listed before today's year in the year selector.
pub const YEARS_BEFORE: i32 = 10;
/// Years listed after today's year in the year selector.
pub const YEARS_AFTER: i32 = 10;
/// Cells in a month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of "today" for the picker.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Month arithmetic
// ---------------------------------------------------------------------------

/// Number of days in `month` of `year`, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 0,
    }
}

/// Move `(year, month)` by `delta` months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let idx = year * 12 + (month as i32 - 1) + delta;
    (idx.div_euclid(12), idx.rem_euclid(12) as u32 + 1)
}

/// Build a date, clamping `day` to the length of the month.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, days_in_month(year, month).max(1));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The candidate years offered by the year selector, oldest first.
///
/// The first entry is always `today.year() - YEARS_BEFORE`.
pub fn year_window(today: NaiveDate) -> Vec<i32> {
    let year = today.year();
    ((year - YEARS_BEFORE)..=(year + YEARS_AFTER)).collect()
}

// ---------------------------------------------------------------------------
// Month grid
// ---------------------------------------------------------------------------

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Whether the cell belongs to the month being shown (the others are
    /// spill-over from the adjacent months).
    pub in_month: bool,
}

/// Six Monday-first weeks covering `month` of `year`.
///
/// Returns an empty grid for a month that does not exist.
pub fn month_grid(year: i32, month: u32) -> Vec<DayCell> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let lead = u64::from(first.weekday().num_days_from_monday());
    let Some(start) = first.checked_sub_days(Days::new(lead)) else {
        return Vec::new();
    };
    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| DayCell {
            date,
            in_month: date.month() == month && date.year() == year,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// Language for the picker's month and weekday labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

const MONTHS_ES: [&str; 12] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto",
    "Septiembre", "Octubre", "Noviembre", "Diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
];

impl Locale {
    /// Full month name; `month` is 1-based.
    pub fn month_name(self, month: u32) -> &'static str {
        let names = match self {
            Locale::Es => &MONTHS_ES,
            Locale::En => &MONTHS_EN,
        };
        month
            .checked_sub(1)
            .and_then(|i| names.get(i as usize))
            .copied()
            .unwrap_or("?")
    }

    /// Three-letter month abbreviation.
    pub fn month_short(self, month: u32) -> &'static str {
        let name = self.month_name(month);
        name.get(..3).unwrap_or(name)
    }

    /// Two-letter weekday heading.
    pub fn weekday_short(self, weekday: Weekday) -> &'static str {
        match (self, weekday) {
            (Locale::Es, Weekday::Mon) => "Lu",
            (Locale::Es, Weekday::Tue) => "Ma",
            (Locale::Es, Weekday::Wed) => "Mi",
            (Locale::Es, Weekday::Thu) => "Ju",
            (Locale::Es, Weekday::Fri) => "Vi",
            (Locale::Es, Weekday::Sat) => "Sa",
            (Locale::Es, Weekday::Sun) => "Do",
            (Locale::En, Weekday::Mon) => "Mo",
            (Locale::En, Weekday::Tue) => "Tu",
            (Locale::En, Weekday::Wed) => "We",
            (Locale::En, Weekday::Thu) => "Th",
            (Locale::En, Weekday::Fri) => "Fr",
            (Locale::En, Weekday::Sat) => "Sa",
            (Locale::En, Weekday::Sun) => "Su",
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
