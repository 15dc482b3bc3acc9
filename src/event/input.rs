//! Input event types, decoupled from crossterm.
//!
//! Terminal events convert through `TryFrom<crossterm::event::Event>`; the
//! rest of the crate never touches crossterm types. [`InputEvent::Change`]
//! has no terminal counterpart: hosts use it to replace a field's text in one
//! step (programmatic edits, autofill, tests).

use crossterm::event as ct;

use crate::geometry::Offset;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    /// Any key form fields do not react to.
    Other,
}

impl From<ct::KeyCode> for Key {
    fn from(code: ct::KeyCode) -> Self {
        match code {
            ct::KeyCode::Char(c) => Key::Char(c),
            ct::KeyCode::Enter => Key::Enter,
            ct::KeyCode::Esc => Key::Escape,
            ct::KeyCode::Tab => Key::Tab,
            ct::KeyCode::BackTab => Key::BackTab,
            ct::KeyCode::Backspace => Key::Backspace,
            ct::KeyCode::Delete => Key::Delete,
            ct::KeyCode::Left => Key::Left,
            ct::KeyCode::Right => Key::Right,
            ct::KeyCode::Up => Key::Up,
            ct::KeyCode::Down => Key::Down,
            ct::KeyCode::Home => Key::Home,
            ct::KeyCode::End => Key::End,
            _ => Key::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Moved,
    Scroll,
}

/// A mouse event at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
}

impl MouseEvent {
    /// A left-button press at (x, y).
    pub fn left_down(x: u16, y: u16) -> Self {
        Self {
            kind: MouseAction::Down(MouseBtn::Left),
            x,
            y,
        }
    }

    /// Whether this is a button press (any button).
    pub fn is_press(&self) -> bool {
        matches!(self.kind, MouseAction::Down(_))
    }

    pub fn position(&self) -> Offset {
        Offset::new(i32::from(self.x), i32::from(self.y))
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event delivered to widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    FocusGained,
    FocusLost,
    Paste(String),
    /// Replace the field's whole text with this raw string.
    Change(String),
}

impl InputEvent {
    /// Shorthand for a left click at (x, y).
    pub fn click(x: u16, y: u16) -> Self {
        InputEvent::Mouse(MouseEvent::left_down(x, y))
    }
}

/// Error for crossterm events that have no [`InputEvent`] equivalent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported terminal event: {0}")]
pub struct UnsupportedEvent(&'static str);

impl TryFrom<ct::Event> for InputEvent {
    type Error = UnsupportedEvent;

    fn try_from(event: ct::Event) -> Result<Self, Self::Error> {
        match event {
            ct::Event::Key(ke) if ke.kind == ct::KeyEventKind::Release => {
                Err(UnsupportedEvent("key release"))
            }
            ct::Event::Key(ke) => Ok(InputEvent::Key(Key::from(ke.code))),
            ct::Event::Mouse(me) => {
                let kind = match me.kind {
                    ct::MouseEventKind::Down(b) => MouseAction::Down(convert_button(b)),
                    ct::MouseEventKind::Up(b) => MouseAction::Up(convert_button(b)),
                    ct::MouseEventKind::Moved | ct::MouseEventKind::Drag(_) => MouseAction::Moved,
                    _ => MouseAction::Scroll,
                };
                Ok(InputEvent::Mouse(MouseEvent {
                    kind,
                    x: me.column,
                    y: me.row,
                }))
            }
            ct::Event::Resize(width, height) => Ok(InputEvent::Resize { width, height }),
            ct::Event::FocusGained => Ok(InputEvent::FocusGained),
            ct::Event::FocusLost => Ok(InputEvent::FocusLost),
            ct::Event::Paste(text) => Ok(InputEvent::Paste(text)),
        }
    }
}

fn convert_button(b: ct::MouseButton) -> MouseBtn {
    match b {
        ct::MouseButton::Left => MouseBtn::Left,
        ct::MouseButton::Right => MouseBtn::Right,
        ct::MouseButton::Middle => MouseBtn::Middle,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
