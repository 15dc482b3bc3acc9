//! Widget trait: render, events, mount/unmount.
//!
//! Every component implements [`Widget`]. The host ([`Surface`]) owns widgets
//! as `Box<dyn Widget>`, tells them where they live through `on_mount`, routes
//! input to them through `handle_event`, and draws them with `render`.
//!
//! [`Surface`]: crate::surface::Surface

use std::any::Any;

use crate::event::InputEvent;
use crate::geometry::Region;
use crate::render::Strip;
use crate::theme::Theme;

/// Core trait implemented by all components.
///
/// Object-safe: the host stores widgets as trait objects and downcasts with
/// `as_any` when a caller needs the concrete type.
pub trait Widget {
    /// The type name (e.g. "DateInput").
    fn widget_type(&self) -> &str;

    /// Render into strips. `region` is where the widget was mounted; widgets
    /// may draw outside it (popups), the host clips to the screen.
    fn render(&self, region: Region, theme: &Theme) -> Vec<Strip>;

    /// Whether the widget can take keyboard focus.
    fn can_focus(&self) -> bool {
        false
    }

    /// Handle an input event. Returns `true` if the widget's state changed.
    ///
    /// Mouse coordinates are absolute screen cells.
    fn handle_event(&mut self, _event: &InputEvent) -> bool {
        false
    }

    /// Called when the widget is placed at `region`.
    fn on_mount(&mut self, _region: Region) {}

    /// Called when the widget is removed from the host. Scoped resources
    /// (listeners, popups) must be released here.
    fn on_unmount(&mut self) {}

    /// The area pointer presses are routed to this widget from.
    ///
    /// Defaults to the mounted region; widgets with popups extend it.
    fn hit_region(&self, mounted: Region) -> Region {
        mounted
    }

    /// Whether the widget currently draws outside its mounted region (an open
    /// popup). The host stacks such widgets above all others.
    fn has_overlay(&self) -> bool {
        false
    }

    /// Stable identifier for automation and tests.
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Read an attribute: well-known ones (`value`, `min`...) or a
    /// passthrough attribute given at construction.
    fn attribute(&self, _name: &str) -> Option<&str> {
        None
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
