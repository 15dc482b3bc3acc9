//! Pilot: programmatic interaction with a headless [`Surface`].
//!
//! The `Pilot` owns a surface and offers the interactions a user would
//! perform (clicks, typing, focus changes) plus queries on the result.
//! Clicks on date-field parts are aimed at the center of the part's region,
//! so tests never hard-code coordinates.

use crate::event::{InputEvent, Key};
use crate::geometry::Region;
use crate::surface::{NodeId, Surface, SurfaceError};
use crate::theme::Theme;
use crate::widget::Widget;
use crate::widgets::date_input::{DateInput, DatePart};

/// A headless driver for tests.
///
/// # Examples
///
/// ```
/// use gilt_forms::geometry::Region;
/// use gilt_forms::testing::Pilot;
/// use gilt_forms::widgets::date_input::{DateInput, DateInputProps};
///
/// let mut pilot = Pilot::new(40, 12);
/// let id = pilot.mount(DateInput::new(DateInputProps::new()).unwrap(), Region::new(0, 0, 16, 1));
/// pilot.click_widget(id);
/// pilot.type_text("010220225555");
/// assert_eq!(pilot.date_input(id).unwrap().value(), "01/02/2022");
/// ```
pub struct Pilot {
    surface: Surface,
}

impl Pilot {
    /// A pilot over an empty surface of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            surface: Surface::new(width, height),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.surface = self.surface.with_theme(theme);
        self
    }

    pub fn mount(&mut self, widget: impl Widget + 'static, region: Region) -> NodeId {
        self.surface.mount(widget, region)
    }

    pub fn unmount(&mut self, id: NodeId) -> Result<Box<dyn Widget>, SurfaceError> {
        self.surface.unmount(id)
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn press_key(&mut self, key: Key) -> bool {
        self.surface.handle_input(InputEvent::Key(key))
    }

    /// Type each character of `text` as a separate key press.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
        }
    }

    pub fn paste(&mut self, text: &str) -> bool {
        self.surface.handle_input(InputEvent::Paste(text.to_owned()))
    }

    /// Replace the focused widget's text, as a host change event would.
    pub fn change(&mut self, id: NodeId, text: &str) -> Result<bool, SurfaceError> {
        self.surface.send(id, InputEvent::Change(text.to_owned()))
    }

    /// Left click at (x, y).
    pub fn click(&mut self, x: u16, y: u16) -> bool {
        self.surface.handle_input(InputEvent::click(x, y))
    }

    /// Click the center of a widget's mounted region.
    pub fn click_widget(&mut self, id: NodeId) -> bool {
        match self.surface.region_of(id) {
            Some(region) => self.click_region(region),
            None => false,
        }
    }

    /// Click the center of a date-field part. Returns `false` without
    /// clicking when the part is not shown.
    pub fn click_date_part(&mut self, id: NodeId, part: DatePart) -> bool {
        let region = self.date_input(id).and_then(|input| input.part_region(part));
        match region {
            Some(region) => self.click_region(region),
            None => false,
        }
    }

    pub fn focus(&mut self, id: NodeId) -> Result<(), SurfaceError> {
        self.surface.focus(id)
    }

    /// Take focus away from whatever has it.
    pub fn blur(&mut self) {
        self.surface.blur();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.surface.handle_input(InputEvent::Resize { width, height });
    }

    fn click_region(&mut self, region: Region) -> bool {
        let at = region.center();
        match (u16::try_from(at.x), u16::try_from(at.y)) {
            (Ok(x), Ok(y)) => self.click(x, y),
            _ => false,
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn find(&self, test_id: &str) -> Option<NodeId> {
        self.surface.find_by_test_id(test_id)
    }

    pub fn widget_as<T: 'static>(&self, id: NodeId) -> Option<&T> {
        self.surface.widget_as::<T>(id)
    }

    pub fn date_input(&self, id: NodeId) -> Option<&DateInput> {
        self.surface.widget_as::<DateInput>(id)
    }

    /// Render the whole surface to text.
    pub fn render_to_text(&mut self) -> String {
        self.surface.render_to_text()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedClock;
    use crate::widgets::date_input::DateInputProps;
    use chrono::NaiveDate;

    fn pilot_with_date() -> (Pilot, NodeId) {
        let today = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let mut pilot = Pilot::new(40, 12);
        let input = DateInput::new(
            DateInputProps::new()
                .with_clock(FixedClock(today))
                .with_test_id("date-input"),
        )
        .unwrap();
        let id = pilot.mount(input, Region::new(0, 0, 16, 1));
        (pilot, id)
    }

    #[test]
    fn find_by_test_id() {
        let (pilot, id) = pilot_with_date();
        assert_eq!(pilot.find("date-input"), Some(id));
    }

    #[test]
    fn click_widget_focuses() {
        let (mut pilot, id) = pilot_with_date();
        pilot.click_widget(id);
        assert_eq!(pilot.surface().focused(), Some(id));
        assert!(pilot.date_input(id).unwrap().is_focused());
    }

    #[test]
    fn hidden_parts_are_not_clicked() {
        let (mut pilot, id) = pilot_with_date();
        assert!(!pilot.click_date_part(id, DatePart::SelectYear));
        assert!(pilot.click_date_part(id, DatePart::CalendarToggle));
        assert!(pilot.click_date_part(id, DatePart::SelectYear));
    }

    #[test]
    fn change_reaches_unfocused_widget() {
        let (mut pilot, id) = pilot_with_date();
        assert_eq!(pilot.change(id, "1002"), Ok(true));
        assert_eq!(pilot.date_input(id).unwrap().value(), "10/02/");
    }

    #[test]
    fn unmount_returns_widget() {
        let (mut pilot, id) = pilot_with_date();
        let widget = pilot.unmount(id).unwrap();
        assert_eq!(widget.widget_type(), "DateInput");
        assert_eq!(pilot.find("date-input"), None);
    }
}
