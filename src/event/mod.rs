//! Event system: input events, change notifications, outside-click listeners.

pub mod input;
pub mod message;
pub mod outside;

pub use input::{InputEvent, Key, MouseAction, MouseBtn, MouseEvent, UnsupportedEvent};
pub use message::{ChangeCallback, ChangeEvent, ChangeSource};
pub use outside::{dispatch_pointer_down, listen_outside, listener_count, OutsideClickGuard};
