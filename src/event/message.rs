//! Change notifications emitted by form fields.

use std::fmt;

/// What produced a value change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// Typing, pasting or a host `Change` event.
    Input,
    /// A selection in the date picker popup.
    Picker,
}

/// Payload delivered to a field's `on_change` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The field's canonical value after the change.
    pub value: String,
    pub source: ChangeSource,
    /// The field's `test_id`, so one callback can serve several fields.
    pub test_id: Option<String>,
}

impl ChangeEvent {
    pub fn new(value: impl Into<String>, source: ChangeSource) -> Self {
        Self {
            value: value.into(),
            source,
            test_id: None,
        }
    }

    pub fn with_test_id(mut self, test_id: Option<&str>) -> Self {
        self.test_id = test_id.map(str::to_owned);
        self
    }
}

/// Boxed `on_change` handler.
pub struct ChangeCallback(Box<dyn FnMut(&ChangeEvent)>);

impl ChangeCallback {
    pub fn new(f: impl FnMut(&ChangeEvent) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn call(&mut self, event: &ChangeEvent) {
        (self.0)(event)
    }
}

impl fmt::Debug for ChangeCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeCallback(..)")
    }
}

// ===========================================================================
// Tests
// ===========================================================================
