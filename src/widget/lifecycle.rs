//! Widget lifecycle: mount, update, unmount.
//!
//! The `LifecycleTracker` records which widgets are currently mounted on a
//! surface and accumulates lifecycle events that the host can drain (to
//! schedule a redraw after `Update`, or to audit teardown in tests).
//!
//! A node has at most one pending `Update`, and drawing a frame settles all
//! of them, so an undrained queue holds at most one entry per mount, unmount
//! and live node.

use std::collections::HashSet;

use crate::surface::NodeId;

/// Events that occur during the widget lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Mount { node_id: NodeId },
    Unmount { node_id: NodeId },
    /// A widget's state changed in response to input and it needs redrawing.
    Update { node_id: NodeId },
}

/// Tracks which nodes are mounted and queues their lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    mounted: HashSet<NodeId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mount. A node already mounted produces no second event.
    pub fn on_mount(&mut self, id: NodeId) {
        if self.mounted.insert(id) {
            self.pending.push(LifecycleEvent::Mount { node_id: id });
        }
    }

    /// Record an unmount. Unknown nodes produce no event.
    pub fn on_unmount(&mut self, id: NodeId) {
        if self.mounted.remove(&id) {
            self.pending.push(LifecycleEvent::Unmount { node_id: id });
        }
    }

    /// Record that a mounted node changed. Coalesces with an `Update` for the
    /// same node that is still pending.
    pub fn on_update(&mut self, id: NodeId) {
        let event = LifecycleEvent::Update { node_id: id };
        if self.mounted.contains(&id) && !self.pending.contains(&event) {
            self.pending.push(event);
        }
    }

    /// Drop pending `Update` events; a full redraw has covered them.
    pub fn settle_updates(&mut self) {
        self.pending.retain(|e| !matches!(e, LifecycleEvent::Update { .. }));
    }

    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.mounted.contains(&id)
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Drain and return all pending lifecycle events, oldest first.
    pub fn drain(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn full_lifecycle_sequence() {
        let id = ids(1)[0];
        let mut tracker = LifecycleTracker::new();
        tracker.on_mount(id);
        tracker.on_update(id);
        tracker.on_unmount(id);
        assert_eq!(
            tracker.drain(),
            vec![
                LifecycleEvent::Mount { node_id: id },
                LifecycleEvent::Update { node_id: id },
                LifecycleEvent::Unmount { node_id: id },
            ]
        );
        assert!(!tracker.has_pending());
    }

    #[test]
    fn repeated_updates_coalesce() {
        let id = ids(1)[0];
        let mut tracker = LifecycleTracker::new();
        tracker.on_mount(id);
        for _ in 0..50 {
            tracker.on_update(id);
        }
        assert_eq!(
            tracker.drain(),
            vec![
                LifecycleEvent::Mount { node_id: id },
                LifecycleEvent::Update { node_id: id },
            ]
        );
    }

    #[test]
    fn settling_keeps_mount_events() {
        let nodes = ids(2);
        let mut tracker = LifecycleTracker::new();
        tracker.on_mount(nodes[0]);
        tracker.on_update(nodes[0]);
        tracker.on_mount(nodes[1]);
        tracker.settle_updates();
        assert_eq!(
            tracker.drain(),
            vec![
                LifecycleEvent::Mount { node_id: nodes[0] },
                LifecycleEvent::Mount { node_id: nodes[1] },
            ]
        );
    }

    #[test]
    fn double_mount_is_noop() {
        let id = ids(1)[0];
        let mut tracker = LifecycleTracker::new();
        tracker.on_mount(id);
        tracker.on_mount(id);
        assert_eq!(tracker.mounted_count(), 1);
        assert_eq!(tracker.drain().len(), 1);
    }

    #[test]
    fn events_for_unmounted_nodes_are_dropped() {
        let id = ids(1)[0];
        let mut tracker = LifecycleTracker::new();
        tracker.on_update(id);
        tracker.on_unmount(id);
        assert!(!tracker.has_pending());
        assert!(!tracker.is_mounted(id));
    }

    #[test]
    fn tracks_several_nodes() {
        let nodes = ids(3);
        let mut tracker = LifecycleTracker::new();
        for &id in &nodes {
            tracker.on_mount(id);
        }
        tracker.on_unmount(nodes[1]);
        assert_eq!(tracker.mounted_count(), 2);
        assert!(tracker.is_mounted(nodes[0]));
        assert!(!tracker.is_mounted(nodes[1]));
    }
}
