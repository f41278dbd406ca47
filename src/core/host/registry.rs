//=========================================================================
// Callback Registry
//=========================================================================
//
// Ordered set of host callbacks keyed by `HostHandle`.
//
// `notify()` snapshots the callback list before invoking anything, so a
// callback may register or deregister callbacks while it runs.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;

//=== Internal Dependencies ===============================================

use super::interface::{HostCallback, HostHandle};

//=== CallbackRegistry ====================================================

type SharedCallback = Rc<RefCell<HostCallback>>;

pub(crate) struct CallbackRegistry {
    callbacks: RefCell<Vec<(HostHandle, SharedCallback)>>,
    next_id: Cell<u64>,
}

impl CallbackRegistry {
    pub(crate) fn new() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub(crate) fn insert(&self, callback: HostCallback) -> HostHandle {
        let handle = HostHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.callbacks
            .borrow_mut()
            .push((handle, Rc::new(RefCell::new(callback))));
        handle
    }

    pub(crate) fn remove(&self, handle: HostHandle) -> bool {
        let removed = {
            let mut callbacks = self.callbacks.borrow_mut();
            callbacks
                .iter()
                .position(|(h, _)| *h == handle)
                .map(|pos| callbacks.remove(pos))
        };
        removed.is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Runs every callback registered at call time, in registration order.
    pub(crate) fn notify(&self) {
        let snapshot: Vec<(HostHandle, SharedCallback)> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(h, cb)| (*h, Rc::clone(cb)))
            .collect();

        for (handle, callback) in snapshot {
            if !self.contains(handle) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut callback) => (*callback)(),
                Err(_) => warn!(target: "resize::host", "Nested notification for {:?} skipped", handle),
            }
        }
    }

    fn contains(&self, handle: HostHandle) -> bool {
        self.callbacks.borrow().iter().any(|(h, _)| *h == handle)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
