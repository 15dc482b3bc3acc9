//! Integration tests for the percentage field.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use gilt_forms::event::{ChangeEvent, Key};
use gilt_forms::geometry::Region;
use gilt_forms::surface::NodeId;
use gilt_forms::testing::Pilot;
use gilt_forms::widgets::date_input::{DateInput, DateInputProps};
use gilt_forms::widgets::{PercentageInput, PercentageInputProps};

fn setup(props: PercentageInputProps) -> (Pilot, NodeId, Rc<RefCell<Vec<String>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let props = props
        .with_test_id("percentage")
        .on_change(move |e: &ChangeEvent| sink.borrow_mut().push(e.value.clone()));
    let mut pilot = Pilot::new(30, 3);
    let id = pilot.mount(PercentageInput::new(props), Region::new(0, 0, 8, 1));
    (pilot, id, seen)
}

fn value(pilot: &Pilot, id: NodeId) -> String {
    pilot
        .widget_as::<PercentageInput>(id)
        .unwrap()
        .value()
        .to_owned()
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

#[test]
fn test_defaults_to_zero() {
    let (pilot, id, _) = setup(PercentageInputProps::new());
    assert_eq!(value(&pilot, id), "0");
}

#[test]
fn test_invalid_initial_value_falls_back() {
    let (pilot, id, _) = setup(PercentageInputProps::new().with_value("150"));
    assert_eq!(value(&pilot, id), "0");
}

#[test]
fn test_typing_builds_decimal() {
    let (mut pilot, id, seen) = setup(PercentageInputProps::new());
    pilot.click_widget(id);
    pilot.press_key(Key::Backspace);
    assert_eq!(value(&pilot, id), "");
    pilot.type_text("42.5");
    assert_eq!(value(&pilot, id), "42.5");
    assert_eq!(*seen.borrow(), vec!["4", "42", "42.", "42.5"]);
}

#[test]
fn test_invalid_keystrokes_are_dropped() {
    let (mut pilot, id, seen) = setup(PercentageInputProps::new().with_value("42.55"));
    pilot.click_widget(id);
    pilot.type_text("7a");
    assert_eq!(value(&pilot, id), "42.55");
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_hundred_takes_no_fraction() {
    let (mut pilot, id, _) = setup(PercentageInputProps::new().with_value("100"));
    pilot.click_widget(id);
    pilot.type_text(".5");
    assert_eq!(value(&pilot, id), "100");
}

#[test]
fn test_keys_ignored_without_focus() {
    let (mut pilot, id, _) = setup(PercentageInputProps::new());
    pilot.type_text("5");
    assert_eq!(value(&pilot, id), "0");
}

#[test]
fn test_change_event_is_checked() {
    let (mut pilot, id, seen) = setup(PercentageInputProps::new());
    assert_eq!(pilot.change(id, "12.34"), Ok(true));
    assert_eq!(pilot.change(id, "12.345"), Ok(false));
    assert_eq!(value(&pilot, id), "12.34");
    assert_eq!(*seen.borrow(), vec!["12.34"]);
}

#[test]
fn test_paste_inserts_at_cursor() {
    let (mut pilot, id, _) = setup(PercentageInputProps::new().with_value("5"));
    pilot.click_widget(id);
    pilot.press_key(Key::Home);
    pilot.paste("1");
    assert_eq!(value(&pilot, id), "15");
}

// ---------------------------------------------------------------------------
// Hosting
// ---------------------------------------------------------------------------

#[test]
fn test_render_with_suffix() {
    let (mut pilot, _id, _) = setup(PercentageInputProps::new().with_value("42.5"));
    let frame = pilot.render_to_text();
    assert_eq!(frame.lines().next(), Some("42.5   %"));
}

#[test]
fn test_tab_moves_between_fields() {
    let (mut pilot, pct, _) = setup(PercentageInputProps::new());
    let date = pilot.mount(
        DateInput::new(DateInputProps::new()).unwrap(),
        Region::new(10, 0, 16, 1),
    );
    pilot.click_widget(pct);
    pilot.press_key(Key::Tab);
    assert_eq!(pilot.surface().focused(), Some(date));
    pilot.type_text("01022022");
    assert_eq!(pilot.date_input(date).unwrap().value(), "01/02/2022");
    assert_eq!(value(&pilot, pct), "0");
}
