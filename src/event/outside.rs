//! Outside-click listeners.
//!
//! A popup that must close when the user clicks anywhere else subscribes with
//! [`listen_outside`] and holds on to the returned [`OutsideClickGuard`].
//! The host reports every pointer press through [`dispatch_pointer_down`];
//! listeners whose bounds do not contain the press are notified. Dropping the
//! guard detaches the listener.
//!
//! The registry is thread-local: widgets live on the UI thread and never
//! share listeners across threads.

use std::cell::RefCell;

use slotmap::{new_key_type, SlotMap};

use crate::geometry::{Offset, Region};

new_key_type! {
    /// Identifies a registered outside-click listener.
    pub struct ListenerId;
}

struct Hooks {
    bounds: Box<dyn Fn() -> Region>,
    on_outside: Box<dyn FnMut(Offset)>,
}

struct Listener {
    /// `None` while the hooks are running (taken out so the callback can
    /// drop its own guard without re-borrowing the registry).
    hooks: Option<Hooks>,
}

thread_local! {
    static LISTENERS: RefCell<SlotMap<ListenerId, Listener>> = RefCell::new(SlotMap::with_key());
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Keeps an outside-click listener attached. Detaches on drop.
#[derive(Debug)]
#[must_use = "the listener is detached as soon as the guard is dropped"]
pub struct OutsideClickGuard {
    id: ListenerId,
}

impl OutsideClickGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for OutsideClickGuard {
    fn drop(&mut self) {
        let removed = LISTENERS.with(|l| l.borrow_mut().remove(self.id).is_some());
        if removed {
            tracing::trace!(id = ?self.id, "outside-click listener detached");
        }
    }
}

/// Attach a listener.
///
/// `bounds` is evaluated on every press, so it can follow a region that grows
/// (a popup opening below a field). `on_outside` runs for presses outside it.
pub fn listen_outside(
    bounds: impl Fn() -> Region + 'static,
    on_outside: impl FnMut(Offset) + 'static,
) -> OutsideClickGuard {
    let id = LISTENERS.with(|l| {
        l.borrow_mut().insert(Listener {
            hooks: Some(Hooks {
                bounds: Box::new(bounds),
                on_outside: Box::new(on_outside),
            }),
        })
    });
    tracing::trace!(?id, "outside-click listener attached");
    OutsideClickGuard { id }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Report a pointer press at `point`. Returns how many listeners fired.
///
/// Listeners may detach themselves (or others) while being notified.
pub fn dispatch_pointer_down(point: Offset) -> usize {
    let ids: Vec<ListenerId> = LISTENERS.with(|l| l.borrow().keys().collect());
    let mut fired = 0;
    for id in ids {
        let taken = LISTENERS.with(|l| l.borrow_mut().get_mut(id).and_then(|e| e.hooks.take()));
        let Some(mut hooks) = taken else {
            continue;
        };
        if !(hooks.bounds)().contains_point(point) {
            (hooks.on_outside)(point);
            fired += 1;
        }
        LISTENERS.with(|l| {
            if let Some(entry) = l.borrow_mut().get_mut(id) {
                entry.hooks = Some(hooks);
            }
        });
    }
    fired
}

/// Number of attached listeners on this thread.
pub fn listener_count() -> usize {
    LISTENERS.with(|l| l.borrow().len())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn field() -> Region {
        Region::new(0, 0, 10, 1)
    }

    #[test]
    fn guard_attaches_and_detaches() {
        let before = listener_count();
        let guard = listen_outside(field, |_| {});
        assert_eq!(listener_count(), before + 1);
        drop(guard);
        assert_eq!(listener_count(), before);
    }

    #[test]
    fn press_inside_does_not_fire() {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _guard = listen_outside(field, move |_| h.set(h.get() + 1));
        assert_eq!(dispatch_pointer_down(Offset::new(3, 0)), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn press_outside_fires_with_point() {
        let last = Rc::new(Cell::new(None));
        let l = Rc::clone(&last);
        let _guard = listen_outside(field, move |p| l.set(Some(p)));
        assert_eq!(dispatch_pointer_down(Offset::new(40, 12)), 1);
        assert_eq!(last.get(), Some(Offset::new(40, 12)));
    }

    #[test]
    fn listener_can_drop_its_own_guard() {
        let slot: Rc<RefCell<Option<OutsideClickGuard>>> = Rc::new(RefCell::new(None));
        let s = Rc::clone(&slot);
        let guard = listen_outside(field, move |_| {
            s.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(guard);
        let before = listener_count();

        dispatch_pointer_down(Offset::new(50, 50));
        assert_eq!(listener_count(), before - 1);
        assert!(slot.borrow().is_none());

        // A second press finds nothing left to notify.
        assert_eq!(dispatch_pointer_down(Offset::new(50, 50)), 0);
    }

    #[test]
    fn bounds_are_read_on_every_press() {
        let width = Rc::new(Cell::new(5));
        let w = Rc::clone(&width);
        let _guard = listen_outside(move || Region::new(0, 0, w.get(), 1), |_| {});
        assert_eq!(dispatch_pointer_down(Offset::new(7, 0)), 1);
        width.set(10);
        assert_eq!(dispatch_pointer_down(Offset::new(7, 0)), 0);
    }
}
