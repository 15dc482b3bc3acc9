//! Headless testing helpers: Pilot and snapshot rendering.
//!
//! Use the [`Pilot`] to drive widgets mounted on a
//! [`Surface`](crate::surface::Surface) without a terminal, and
//! [`render_to_string`] to capture a widget's output as plain text.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{render_to_string, strips_to_string};
