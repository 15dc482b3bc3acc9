//! Widget system: trait and lifecycle.

pub mod lifecycle;
pub mod traits;

pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use traits::Widget;
