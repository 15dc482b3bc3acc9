//! Rendering primitives: strips of styled cells and the screen buffer they
//! are composed into.

pub mod compositor;
pub mod strip;

pub use compositor::Compositor;
pub use strip::{CellStyle, Strip, StyledCell};
