//! PercentageInput: a text field that only ever holds a percentage.
//!
//! Accepted text is `100`, or one or two digits with an optional `.` and up
//! to two decimals. Edits that would produce anything else are dropped.
//! Clearing the field is allowed but is not reported as a change.

use std::any::Any;
use std::fmt;

use crate::date::VisualState;
use crate::event::{ChangeCallback, ChangeEvent, ChangeSource, InputEvent, Key};
use crate::geometry::Region;
use crate::render::Strip;
use crate::theme::Theme;
use crate::widget::Widget;

/// Value a field starts with when none is given.
pub const DEFAULT_VALUE: &str = "0";

/// Whether `text` is an acceptable percentage.
///
/// ```
/// use gilt_forms::widgets::percentage_input::is_percentage;
///
/// assert!(is_percentage("42."));
/// assert!(is_percentage("100"));
/// assert!(!is_percentage("100."));
/// assert!(!is_percentage("101"));
/// ```
pub fn is_percentage(text: &str) -> bool {
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text, None),
    };
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int == "100" {
        return frac.is_none();
    }
    let int_ok = (1..=2).contains(&int.len()) && digits(int);
    let frac_ok = frac.map_or(true, |f| f.len() <= 2 && digits(f));
    int_ok && frac_ok
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// Builder-style configuration for a [`PercentageInput`].
#[derive(Default)]
pub struct PercentageInputProps {
    pub value: Option<String>,
    pub test_id: Option<String>,
    pub placeholder: String,
    pub attributes: Vec<(String, String)>,
    on_change: Option<ChangeCallback>,
}

impl PercentageInputProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(ChangeCallback::new(f));
        self
    }
}

impl fmt::Debug for PercentageInputProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PercentageInputProps")
            .field("value", &self.value)
            .field("test_id", &self.test_id)
            .field("placeholder", &self.placeholder)
            .field("attributes", &self.attributes)
            .field("on_change", &self.on_change)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// PercentageInput
// ---------------------------------------------------------------------------

/// A percentage field with a cursor.
///
/// The cursor is a byte offset into the value. Values are ASCII, but the
/// cursor helpers stay char-boundary safe.
pub struct PercentageInput {
    value: String,
    cursor: usize,
    focused: bool,
    placeholder: String,
    test_id: Option<String>,
    attributes: Vec<(String, String)>,
    on_change: Option<ChangeCallback>,
}

impl PercentageInput {
    pub fn new(props: PercentageInputProps) -> Self {
        let PercentageInputProps {
            value,
            test_id,
            placeholder,
            attributes,
            on_change,
        } = props;
        let value = match value.filter(|v| !v.is_empty()) {
            Some(v) if is_percentage(&v) => v,
            Some(v) => {
                tracing::warn!(value = %v, "initial percentage rejected");
                DEFAULT_VALUE.to_owned()
            }
            None => DEFAULT_VALUE.to_owned(),
        };
        Self {
            cursor: value.len(),
            value,
            focused: false,
            placeholder,
            test_id,
            attributes,
            on_change,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position as a byte offset.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Offer a whole new text. Returns whether it was taken.
    pub fn set_text(&mut self, text: &str) -> bool {
        let cursor = text.len();
        self.propose(text.to_owned(), cursor)
    }

    /// Insert `ch` at the cursor, if the result is still a percentage.
    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut next = self.value.clone();
        next.insert(self.cursor, ch);
        self.propose(next, self.cursor + ch.len_utf8())
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_char_boundary();
        let mut next = self.value.clone();
        next.drain(prev..self.cursor);
        self.propose(next, prev)
    }

    /// Delete the character after the cursor.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        let end = self.next_char_boundary();
        let mut next = self.value.clone();
        next.drain(self.cursor..end);
        self.propose(next, self.cursor)
    }

    pub fn move_cursor_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = self.prev_char_boundary();
        true
    }

    pub fn move_cursor_right(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.cursor = self.next_char_boundary();
        true
    }

    pub fn move_cursor_home(&mut self) -> bool {
        std::mem::replace(&mut self.cursor, 0) != 0
    }

    pub fn move_cursor_end(&mut self) -> bool {
        let end = self.value.len();
        std::mem::replace(&mut self.cursor, end) != end
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "value" => Some(&self.value),
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
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Take `next` if it is empty or a percentage. Only non-empty changes
    /// are reported.
    fn propose(&mut self, next: String, cursor: usize) -> bool {
        if next == self.value {
            self.cursor = cursor.min(self.value.len());
            return false;
        }
        if next.is_empty() {
            self.value.clear();
            self.cursor = 0;
            return true;
        }
        if !is_percentage(&next) {
            tracing::trace!(rejected = %next, "percentage edit dropped");
            return false;
        }
        self.value = next;
        self.cursor = cursor.min(self.value.len());
        if let Some(callback) = self.on_change.as_mut() {
            let event = ChangeEvent::new(self.value.clone(), ChangeSource::Input)
                .with_test_id(self.test_id.as_deref());
            callback.call(&event);
        }
        true
    }

    fn prev_char_boundary(&self) -> usize {
        let mut pos = self.cursor.saturating_sub(1);
        while pos > 0 && !self.value.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_char_boundary(&self) -> usize {
        let mut pos = self.cursor + 1;
        while pos < self.value.len() && !self.value.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }
}

impl Default for PercentageInput {
    fn default() -> Self {
        Self::new(PercentageInputProps::default())
    }
}

impl fmt::Debug for PercentageInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PercentageInput")
            .field("value", &self.value)
            .field("cursor", &self.cursor)
            .field("focused", &self.focused)
            .field("test_id", &self.test_id)
            .finish_non_exhaustive()
    }
}

impl Widget for PercentageInput {
    fn widget_type(&self) -> &str {
        "PercentageInput"
    }

    fn can_focus(&self) -> bool {
        true
    }

    /// The value (or dim placeholder), with a `%` in the last cell.
    fn render(&self, region: Region, theme: &Theme) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let state = if self.focused {
            VisualState::Active
        } else {
            VisualState::Default
        };
        let style = theme.field_style(state);
        let text_width = (region.width - 1).max(0) as usize;
        let mut strip = Strip::new(region.y, region.x);
        if self.value.is_empty() {
            strip.push_padded(&self.placeholder, text_width, &style.clone().dim());
        } else {
            strip.push_padded(&self.value, text_width, &style);
        }
        strip.push('%', style.clone());
        strip.fill(region.width, style);
        vec![strip]
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) if self.focused => match key {
                Key::Char(ch) => self.insert_char(*ch),
                Key::Backspace => self.delete_char(),
                Key::Delete => self.delete_forward(),
                Key::Left => self.move_cursor_left(),
                Key::Right => self.move_cursor_right(),
                Key::Home => self.move_cursor_home(),
                Key::End => self.move_cursor_end(),
                _ => false,
            },
            InputEvent::Paste(text) if self.focused => {
                let mut next = self.value.clone();
                next.insert_str(self.cursor, text);
                self.propose(next, self.cursor + text.len())
            }
            InputEvent::Change(text) => self.set_text(text),
            InputEvent::Mouse(mouse) if mouse.is_press() => {
                let changed = !self.focused;
                self.focused = true;
                changed
            }
            InputEvent::FocusGained => !std::mem::replace(&mut self.focused, true),
            InputEvent::FocusLost => std::mem::replace(&mut self.focused, false),
            _ => false,
        }
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id.as_deref()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        PercentageInput::attribute(self, name)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn region(w: i32) -> Region {
        Region::new(0, 0, w, 1)
    }

    fn recording(props: PercentageInputProps) -> (PercentageInput, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let input =
            PercentageInput::new(props.on_change(move |e| sink.borrow_mut().push(e.value.clone())));
        (input, seen)
    }

    // -----------------------------------------------------------------------
    // Pattern
    // -----------------------------------------------------------------------

    #[test]
    fn accepted_shapes() {
        for ok in ["0", "5", "42", "42.", "99.9", "07.25", "100", "1.0"] {
            assert!(is_percentage(ok), "{ok} should be accepted");
        }
    }

    #[test]
    fn rejected_shapes() {
        for bad in ["", ".5", "100.", "100.0", "101", "123", "5.123", "4a", "1..2", "-1", "1.2.3"] {
            assert!(!is_percentage(bad), "{bad} should be rejected");
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn defaults_to_zero() {
        assert_eq!(PercentageInput::default().value(), "0");
        let input = PercentageInput::new(PercentageInputProps::new().with_value(""));
        assert_eq!(input.value(), "0");
    }

    #[test]
    fn invalid_initial_value_falls_back() {
        let input = PercentageInput::new(PercentageInputProps::new().with_value("250"));
        assert_eq!(input.value(), "0");
    }

    #[test]
    fn initial_value_puts_cursor_at_end() {
        let input = PercentageInput::new(PercentageInputProps::new().with_value("12.5"));
        assert_eq!(input.cursor_position(), 4);
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    #[test]
    fn valid_edits_are_reported() {
        let (mut input, seen) = recording(PercentageInputProps::new().with_value("4"));
        assert!(input.insert_char('2'));
        assert!(input.insert_char('.'));
        assert!(input.insert_char('5'));
        assert_eq!(input.value(), "42.5");
        assert_eq!(*seen.borrow(), vec!["42", "42.", "42.5"]);
    }

    #[test]
    fn invalid_edits_are_ignored() {
        let (mut input, seen) = recording(PercentageInputProps::new().with_value("42"));
        assert!(!input.insert_char('7'));
        assert!(!input.insert_char('x'));
        assert_eq!(input.value(), "42");
        assert_eq!(input.cursor_position(), 2);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn clearing_is_silent() {
        let (mut input, seen) = recording(PercentageInputProps::new().with_value("7"));
        assert!(input.delete_char());
        assert_eq!(input.value(), "");
        assert!(seen.borrow().is_empty());
        assert!(input.set_text("100"));
        assert_eq!(*seen.borrow(), vec!["100"]);
    }

    #[test]
    fn edits_in_the_middle() {
        let mut input = PercentageInput::new(PercentageInputProps::new().with_value("15"));
        input.move_cursor_home();
        assert!(!input.insert_char('9'), "915 is over 100");
        assert!(input.move_cursor_right());
        assert!(input.insert_char('.'));
        assert_eq!(input.value(), "1.5");
        assert_eq!(input.cursor_position(), 2);
        input.move_cursor_home();
        assert!(!input.delete_forward(), ".5 has no integer part");
        assert_eq!(input.value(), "1.5");
    }

    // -----------------------------------------------------------------------
    // Widget
    // -----------------------------------------------------------------------

    #[test]
    fn keys_need_focus() {
        let mut input = PercentageInput::default();
        assert!(!input.handle_event(&InputEvent::Key(Key::Char('5'))));
        input.handle_event(&InputEvent::FocusGained);
        assert!(input.handle_event(&InputEvent::Key(Key::Char('5'))));
        assert_eq!(input.value(), "05");
    }

    #[test]
    fn change_event_filters_like_typing() {
        let mut input = PercentageInput::default();
        assert!(!input.handle_event(&InputEvent::Change("100.5".into())));
        assert!(input.handle_event(&InputEvent::Change("99.99".into())));
        assert_eq!(input.value(), "99.99");
    }

    #[test]
    fn render_value_with_suffix() {
        let input = PercentageInput::new(PercentageInputProps::new().with_value("12.5"));
        let strips = input.render(region(8), &Theme::default());
        assert_eq!(strips[0].text(), "12.5   %");
        assert_eq!(strips[0].width(), 8);
        assert!(input.render(region(0), &Theme::default()).is_empty());
    }

    #[test]
    fn render_placeholder_dim() {
        let mut input = PercentageInput::new(PercentageInputProps::new().with_placeholder("0-100"));
        input.set_text("");
        let strips = input.render(region(8), &Theme::default());
        assert_eq!(strips[0].text(), "0-100  %");
        assert!(strips[0].cells[0].style.dim);
        assert!(!strips[0].cells[7].style.dim);
    }

    #[test]
    fn focused_field_is_active() {
        let mut input = PercentageInput::default();
        input.handle_event(&InputEvent::click(0, 0));
        let strips = input.render(region(4), &Theme::default());
        assert_eq!(strips[0].cells[0].style.fg.as_deref(), Some("blue-500"));
    }

    #[test]
    fn attributes_pass_through() {
        let input = PercentageInput::new(
            PercentageInputProps::new()
                .with_test_id("pct")
                .with_attribute("name", "discount"),
        );
        assert_eq!(input.attribute("name"), Some("discount"));
        assert_eq!(Widget::test_id(&input), Some("pct"));
        assert_eq!(input.attribute("value"), Some("0"));
    }
}
