//! DateInput: a `DD/MM/YYYY` text field with a calendar popup.
//!
//! Text edits go through the mask, picker selections through
//! [`format_date`]; both paths end in the same value and the same
//! `on_change` notification. The year check is live, everything else is
//! judged on blur.

pub mod layout;
pub mod picker;
pub mod props;
mod view;

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::date::{
    format_date, mask_date, Clock, Locale, ParsedDate, Validation, Verdict, VisualState,
};
use crate::event::{listen_outside, ChangeCallback, ChangeEvent, ChangeSource, InputEvent, Key};
use crate::geometry::Region;
use crate::render::Strip;
use crate::theme::Theme;
use crate::widget::Widget;

pub use layout::DatePart;
pub use picker::{Picker, PickerView};
pub use props::{BoundKind, ConfigError, DateInputProps, DEFAULT_PLACEHOLDER};

use view::FieldView;

/// A date field.
///
/// # Examples
///
/// ```
/// use gilt_forms::widgets::date_input::{DateInput, DateInputProps};
///
/// let mut input = DateInput::new(DateInputProps::new()).unwrap();
/// input.set_text("010220225555");
/// assert_eq!(input.value(), "01/02/2022");
/// ```
pub struct DateInput {
    value: String,
    focused: bool,
    validation: Validation,
    /// Shared with the outside-click listener while the popup is open.
    picker: Rc<RefCell<Picker>>,
    region: Region,
    clock: Box<dyn Clock>,
    locale: Locale,
    placeholder: String,
    test_id: Option<String>,
    min: Option<String>,
    max: Option<String>,
    attributes: Vec<(String, String)>,
    on_change: Option<ChangeCallback>,
}

impl DateInput {
    /// Build a field from its props. Fails when a bound cannot be read.
    pub fn new(props: DateInputProps) -> Result<Self, ConfigError> {
        let bounds = props.bounds()?;
        let DateInputProps {
            value,
            min,
            max,
            variant,
            test_id,
            placeholder,
            locale,
            attributes,
            clock,
            on_change,
        } = props;
        let today = clock.today();
        Ok(Self {
            value: value.map(|v| mask_date(&v, "")).unwrap_or_default(),
            focused: false,
            validation: Validation::new(bounds, variant),
            picker: Rc::new(RefCell::new(Picker::new(today))),
            region: Region::EMPTY,
            clock,
            locale,
            placeholder,
            test_id,
            min,
            max,
            attributes,
            on_change,
        })
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn visual_state(&self) -> VisualState {
        self.validation.visual_state(&self.value)
    }

    /// The verdict of the last blur or picker commit.
    pub fn verdict(&self) -> Option<Verdict> {
        self.validation.verdict()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_open(&self) -> bool {
        self.picker.borrow().is_open()
    }

    pub fn picker_view(&self) -> PickerView {
        self.picker.borrow().view()
    }

    /// The (year, month) the day view is showing.
    pub fn viewed_month(&self) -> (i32, u32) {
        self.picker.borrow().viewed_month()
    }

    /// Years offered by the year view, oldest first.
    pub fn year_options(&self) -> Vec<i32> {
        self.picker.borrow().year_options()
    }

    /// The value as a calendar date, when it is a complete one.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        ParsedDate::parse(&self.value).to_calendar_date()
    }

    /// Where the field is mounted; empty before mount.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Where `part` is drawn right now, if it is shown.
    pub fn part_region(&self, part: DatePart) -> Option<Region> {
        layout::part_region(self.region, &self.picker.borrow(), part)
    }

    /// Which part lies under screen cell `(x, y)`.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<DatePart> {
        layout::hit_test(self.region, &self.picker.borrow(), x, y)
    }

    /// Read an attribute: `value`, `min`, `max`, `placeholder`, `test_id`,
    /// or a passthrough attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "value" => Some(&self.value),
            "min" => self.min.as_deref(),
            "max" => self.max.as_deref(),
            "placeholder" => Some(&self.placeholder),
            "test_id" => self.test_id.as_deref(),
            _ => self
                .attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
        }
    }

    // -----------------------------------------------------------------------
    // Text edits
    // -----------------------------------------------------------------------

    /// Replace the text with `raw`, masked. Returns whether the value changed.
    pub fn set_text(&mut self, raw: &str) -> bool {
        let masked = mask_date(raw, &self.value);
        self.replace_value(masked, ChangeSource::Input)
    }

    /// Append typed text at the end of the value.
    pub fn type_text(&mut self, text: &str) -> bool {
        let raw = format!("{}{}", self.value, text);
        self.set_text(&raw)
    }

    /// Delete the last character. Deleting a trailing separator takes the
    /// digit before it too.
    pub fn backspace(&mut self) -> bool {
        let mut raw = self.value.clone();
        raw.pop();
        self.set_text(&raw)
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    pub fn focus(&mut self) -> bool {
        let changed = !self.focused;
        self.focused = true;
        changed
    }

    /// Leave the field and run the full validation.
    pub fn blur(&mut self) -> Verdict {
        self.focused = false;
        self.validation.settle(&self.value)
    }

    // -----------------------------------------------------------------------
    // Picker
    // -----------------------------------------------------------------------

    /// Open the popup on the day view.
    ///
    /// The view starts on the value's month when the value is a complete
    /// date, otherwise on today's.
    pub fn open_picker(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        let today = self.clock.today();
        let seed = self.selected_date().unwrap_or(today);

        let for_bounds = Rc::downgrade(&self.picker);
        let for_close = Rc::downgrade(&self.picker);
        let guard = listen_outside(
            move || {
                let Some(picker) = for_bounds.upgrade() else {
                    return Region::EMPTY;
                };
                picker.try_borrow().map_or(Region::EMPTY, |p| p.area())
            },
            move |point| {
                let Some(picker) = for_close.upgrade() else {
                    return;
                };
                let Ok(mut picker) = picker.try_borrow_mut() else {
                    return;
                };
                if picker.close() {
                    tracing::debug!(
                        x = point.x,
                        y = point.y,
                        "date picker dismissed by outside press"
                    );
                }
            },
        );

        let mut picker = self.picker.borrow_mut();
        picker.open(seed, today, layout::open_area(self.region));
        picker.attach(guard);
        tracing::debug!(test_id = ?self.test_id, %seed, "date picker opened");
        true
    }

    /// Close the popup from any view. Returns whether it was open.
    pub fn close_picker(&mut self) -> bool {
        let closed = self.picker.borrow_mut().close();
        if closed {
            tracing::debug!(test_id = ?self.test_id, "date picker closed");
        }
        closed
    }

    /// Press `part`. Returns whether anything changed.
    pub fn activate(&mut self, part: DatePart) -> bool {
        match part {
            DatePart::Field => self.focus(),
            DatePart::CalendarToggle => {
                if self.is_open() {
                    self.close_picker()
                } else {
                    self.open_picker()
                }
            }
            DatePart::Popup => false,
            DatePart::SelectMonth => self.switch_view(Picker::toggle_month_select),
            DatePart::SelectYear => self.switch_view(Picker::toggle_year_select),
            DatePart::PrevMonth => self.step_month(-1),
            DatePart::NextMonth => self.step_month(1),
            DatePart::Month(month) => {
                let selected = self.selected_date();
                self.choose(|p| p.choose_month(month, selected))
            }
            DatePart::Year(year) => {
                let selected = self.selected_date();
                self.choose(|p| p.choose_year(year, selected))
            }
            DatePart::Day(day) => {
                let chosen = self.picker.borrow_mut().choose_day(day);
                match chosen {
                    Some(date) => {
                        self.commit(date);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    fn switch_view(&mut self, f: impl FnOnce(&mut Picker)) -> bool {
        let mut picker = self.picker.borrow_mut();
        let before = picker.view();
        f(&mut *picker);
        picker.view() != before
    }

    fn step_month(&mut self, delta: i32) -> bool {
        let mut picker = self.picker.borrow_mut();
        let before = picker.viewed_month();
        picker.step_month(delta);
        picker.viewed_month() != before
    }

    /// Run a month or year choice; commit the re-synced date if there is one.
    fn choose(&mut self, f: impl FnOnce(&mut Picker) -> Option<NaiveDate>) -> bool {
        let (accepted, synced) = {
            let mut picker = self.picker.borrow_mut();
            let before = picker.view();
            let synced = f(&mut *picker);
            (picker.view() != before, synced)
        };
        if let Some(date) = synced {
            self.commit(date);
        }
        accepted
    }

    /// Take a date from the picker: serialize, validate, notify.
    fn commit(&mut self, date: NaiveDate) {
        let text = format_date(date);
        tracing::debug!(test_id = ?self.test_id, value = %text, "date picked");
        self.replace_value(text, ChangeSource::Picker);
        self.validation.settle(&self.value);
    }

    fn replace_value(&mut self, value: String, source: ChangeSource) -> bool {
        if value == self.value {
            return false;
        }
        self.value = value;
        if let Some(callback) = self.on_change.as_mut() {
            let event = ChangeEvent::new(self.value.clone(), source)
                .with_test_id(self.test_id.as_deref());
            callback.call(&event);
        }
        true
    }
}

impl std::fmt::Debug for DateInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateInput")
            .field("value", &self.value)
            .field("focused", &self.focused)
            .field("validation", &self.validation)
            .field("picker", &self.picker)
            .field("region", &self.region)
            .field("test_id", &self.test_id)
            .finish_non_exhaustive()
    }
}

impl Widget for DateInput {
    fn widget_type(&self) -> &str {
        "DateInput"
    }

    fn render(&self, region: Region, theme: &Theme) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let picker = self.picker.borrow();
        let field = FieldView {
            value: &self.value,
            placeholder: &self.placeholder,
            state: self.visual_state(),
            focused: self.focused,
            open: picker.is_open(),
        };
        let mut strips = vec![view::render_field(region, &field, theme)];
        if picker.is_open() {
            strips.extend(view::render_popup(
                region,
                &picker,
                self.selected_date(),
                self.locale,
                theme,
            ));
        }
        strips
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Mouse(mouse) if mouse.is_press() => {
                let at = mouse.position();
                match self.hit_test(at.x, at.y) {
                    Some(part) => self.activate(part),
                    None => false,
                }
            }
            InputEvent::Key(Key::Char(ch)) if self.focused => {
                self.type_text(ch.encode_utf8(&mut [0; 4]))
            }
            InputEvent::Key(Key::Backspace) if self.focused => self.backspace(),
            InputEvent::Key(Key::Escape) => self.close_picker(),
            InputEvent::Paste(text) if self.focused => self.type_text(text),
            InputEvent::Change(text) => self.set_text(text),
            InputEvent::FocusGained => self.focus(),
            InputEvent::FocusLost => {
                self.blur();
                true
            }
            _ => false,
        }
    }

    fn on_mount(&mut self, region: Region) {
        self.region = region;
        let mut picker = self.picker.borrow_mut();
        if picker.is_open() {
            picker.set_area(layout::open_area(region));
        }
    }

    fn on_unmount(&mut self) {
        self.close_picker();
    }

    fn has_overlay(&self) -> bool {
        self.is_open()
    }

    fn hit_region(&self, mounted: Region) -> Region {
        if self.is_open() {
            layout::open_area(mounted)
        } else {
            mounted
        }
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id.as_deref()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        DateInput::attribute(self, name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
