//! Surface: owns mounted widgets, routes input, tracks focus, draws frames.
//!
//! Every widget is mounted at a fixed [`Region`] and addressed by a
//! [`NodeId`]. Pointer presses are first reported to the outside-click
//! registry, then routed to the topmost widget whose hit region contains
//! them; that widget takes focus and the previously focused one is blurred.
//! Other input goes to the focused widget.
//!
//! Stacking follows mount order, except that widgets with an open overlay
//! (a date popup) sit above every widget without one.

use slotmap::{new_key_type, SlotMap};

use crate::event::{dispatch_pointer_down, InputEvent, Key};
use crate::geometry::Region;
use crate::render::Compositor;
use crate::theme::Theme;
use crate::widget::{LifecycleEvent, LifecycleTracker, Widget};

new_key_type! {
    /// Identifies a widget mounted on a [`Surface`].
    pub struct NodeId;
}

/// Errors from addressing widgets on a surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("no widget mounted as {0:?}")]
    UnknownNode(NodeId),
    #[error("widget {0:?} cannot take focus")]
    NotFocusable(NodeId),
}

struct Node {
    widget: Box<dyn Widget>,
    region: Region,
}

/// A headless host for widgets.
pub struct Surface {
    nodes: SlotMap<NodeId, Node>,
    /// Mount order; later entries are drawn on top and hit first.
    order: Vec<NodeId>,
    focused: Option<NodeId>,
    lifecycle: LifecycleTracker,
    theme: Theme,
    compositor: Compositor,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            order: Vec::new(),
            focused: None,
            lifecycle: LifecycleTracker::new(),
            theme: Theme::default(),
            compositor: Compositor::new(width, height),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn size(&self) -> (u16, u16) {
        (self.compositor.width, self.compositor.height)
    }

    // -----------------------------------------------------------------------
    // Mounting
    // -----------------------------------------------------------------------

    /// Place `widget` at `region`.
    pub fn mount(&mut self, widget: impl Widget + 'static, region: Region) -> NodeId {
        self.mount_boxed(Box::new(widget), region)
    }

    pub fn mount_boxed(&mut self, mut widget: Box<dyn Widget>, region: Region) -> NodeId {
        widget.on_mount(region);
        let kind = widget.widget_type().to_owned();
        let id = self.nodes.insert(Node { widget, region });
        self.order.push(id);
        self.lifecycle.on_mount(id);
        tracing::debug!(?id, widget = %kind, ?region, "widget mounted");
        id
    }

    /// Remove a widget, running its `on_unmount` hook, and hand it back.
    pub fn unmount(&mut self, id: NodeId) -> Result<Box<dyn Widget>, SurfaceError> {
        let mut node = self.nodes.remove(id).ok_or(SurfaceError::UnknownNode(id))?;
        self.order.retain(|&n| n != id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        node.widget.on_unmount();
        self.lifecycle.on_unmount(id);
        tracing::debug!(?id, "widget unmounted");
        Ok(node.widget)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn region_of(&self, id: NodeId) -> Option<Region> {
        self.nodes.get(id).map(|n| n.region)
    }

    /// Mounted widgets in mount order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn widget(&self, id: NodeId) -> Option<&dyn Widget> {
        self.nodes.get(id).map(|n| n.widget.as_ref())
    }

    pub fn widget_mut(&mut self, id: NodeId) -> Option<&mut dyn Widget> {
        match self.nodes.get_mut(id) {
            Some(node) => Some(node.widget.as_mut()),
            None => None,
        }
    }

    /// The widget at `id` as its concrete type.
    pub fn widget_as<T: 'static>(&self, id: NodeId) -> Option<&T> {
        self.widget(id)?.as_any().downcast_ref::<T>()
    }

    pub fn widget_as_mut<T: 'static>(&mut self, id: NodeId) -> Option<&mut T> {
        self.widget_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// The first widget mounted with this `test_id`.
    pub fn find_by_test_id(&self, test_id: &str) -> Option<NodeId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.nodes.get(id).and_then(|n| n.widget.test_id()) == Some(test_id))
    }

    /// Widgets whose attribute `name` equals `value`, in mount order.
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| self.nodes.get(id).and_then(|n| n.widget.attribute(name)) == Some(value))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus to `id`, blurring whatever had it.
    pub fn focus(&mut self, id: NodeId) -> Result<(), SurfaceError> {
        let node = self.nodes.get(id).ok_or(SurfaceError::UnknownNode(id))?;
        if !node.widget.can_focus() {
            return Err(SurfaceError::NotFocusable(id));
        }
        self.set_focus(Some(id));
        Ok(())
    }

    /// Blur the focused widget, if any.
    pub fn blur(&mut self) {
        self.set_focus(None);
    }

    /// Move focus forward (`Tab`) or backward through focusable widgets,
    /// in mount order, wrapping around.
    pub fn cycle_focus(&mut self, forward: bool) -> Option<NodeId> {
        let chain: Vec<NodeId> = self
            .order
            .iter()
            .copied()
            .filter(|&id| self.nodes.get(id).is_some_and(|n| n.widget.can_focus()))
            .collect();
        if chain.is_empty() {
            return None;
        }
        let current = self.focused.and_then(|f| chain.iter().position(|&n| n == f));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % chain.len(),
            (Some(0), false) | (None, false) => chain.len() - 1,
            (Some(i), false) => i - 1,
            (None, true) => 0,
        };
        let id = chain[next];
        self.set_focus(Some(id));
        Some(id)
    }

    fn set_focus(&mut self, target: Option<NodeId>) {
        if self.focused == target {
            return;
        }
        if let Some(prev) = self.focused.take() {
            self.deliver(prev, &InputEvent::FocusLost);
        }
        if let Some(next) = target {
            self.focused = Some(next);
            self.deliver(next, &InputEvent::FocusGained);
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Route one input event. Returns whether any widget changed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match &event {
            InputEvent::Mouse(mouse) if mouse.is_press() => {
                let fired = dispatch_pointer_down(mouse.position());
                let at = mouse.position();
                let target = self.hit_test(at.x, at.y);
                let focusable = target.filter(|&id| {
                    self.nodes.get(id).is_some_and(|n| n.widget.can_focus())
                });
                match focusable {
                    Some(id) => self.set_focus(Some(id)),
                    None if target.is_none() => self.set_focus(None),
                    None => {}
                }
                let handled = target.is_some_and(|id| self.deliver(id, &event));
                handled || fired > 0
            }
            InputEvent::Mouse(_) => false,
            InputEvent::Key(Key::Tab) => self.cycle_focus(true).is_some(),
            InputEvent::Key(Key::BackTab) => self.cycle_focus(false).is_some(),
            InputEvent::Resize { width, height } => {
                self.compositor.resize(*width, *height);
                true
            }
            InputEvent::FocusGained | InputEvent::FocusLost => false,
            InputEvent::Key(_) | InputEvent::Paste(_) | InputEvent::Change(_) => {
                match self.focused {
                    Some(id) => self.deliver(id, &event),
                    None => false,
                }
            }
        }
    }

    /// Deliver an event straight to one widget, bypassing focus and hit
    /// testing.
    pub fn send(&mut self, id: NodeId, event: InputEvent) -> Result<bool, SurfaceError> {
        if !self.nodes.contains_key(id) {
            return Err(SurfaceError::UnknownNode(id));
        }
        Ok(self.deliver(id, &event))
    }

    /// The topmost widget whose hit region contains (x, y).
    pub fn hit_test(&self, x: i32, y: i32) -> Option<NodeId> {
        self.stacking_order().into_iter().rev().find(|&id| {
            self.nodes
                .get(id)
                .is_some_and(|n| n.widget.hit_region(n.region).contains(x, y))
        })
    }

    /// Mounted widgets bottom to top: plain widgets in mount order, then
    /// widgets with an open overlay in mount order.
    pub fn stacking_order(&self) -> Vec<NodeId> {
        let overlay = |id: &NodeId| self.nodes.get(*id).is_some_and(|n| n.widget.has_overlay());
        let (top, mut layers): (Vec<NodeId>, Vec<NodeId>) =
            self.order.iter().copied().partition(overlay);
        layers.extend(top);
        layers
    }

    fn deliver(&mut self, id: NodeId, event: &InputEvent) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let changed = node.widget.handle_event(event);
        if changed {
            self.lifecycle.on_update(id);
        }
        changed
    }

    // -----------------------------------------------------------------------
    // Lifecycle and drawing
    // -----------------------------------------------------------------------

    /// Drain lifecycle events recorded since the last call. Hosts that react
    /// to `Update` call this before [`render`](Surface::render).
    pub fn drain_lifecycle(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.drain()
    }

    /// Draw every widget bottom to top and return the frame.
    ///
    /// A frame redraws everything, so pending `Update` events are settled;
    /// mount and unmount events stay queued for [`drain_lifecycle`].
    ///
    /// [`drain_lifecycle`]: Surface::drain_lifecycle
    pub fn render(&mut self) -> &Compositor {
        self.compositor.clear();
        let clip = self.compositor.bounds();
        for id in self.stacking_order() {
            if let Some(node) = self.nodes.get(id) {
                let strips = node.widget.render(node.region, &self.theme);
                self.compositor.place_strips(&strips, clip);
            }
        }
        self.lifecycle.settle_updates();
        &self.compositor
    }

    /// Render and return the frame as text.
    pub fn render_to_text(&mut self) -> String {
        self.render().to_text()
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        for node in self.nodes.values_mut() {
            node.widget.on_unmount();
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
