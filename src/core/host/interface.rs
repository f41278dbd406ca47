//=========================================================================
// Host Interface
//=========================================================================
//
// Contract between the resize adapter and whatever owns the window.
//
// The adapter never reaches for a global window object: it is handed an
// `Rc<dyn ResizeHost>` and talks to it through these four calls.
//
//=========================================================================

//=== HostCallback ========================================================

/// Invoked by the host once per native resize notification.
///
/// Carries no payload; the adapter reads the current size back through
/// [`ResizeHost::current_width`] and [`ResizeHost::current_height`].
pub type HostCallback = Box<dyn FnMut()>;

//=== HostHandle ==========================================================

/// Identifies one registered callback. Returned by [`ResizeHost::subscribe`].
///
/// Hosts choose the id; it only has to be unique among their live
/// registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostHandle(pub(crate) u64);

impl HostHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

impl From<u64> for HostHandle {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

//=== ResizeHost ==========================================================

/// A window-like environment that reports size changes.
///
/// Registration is infallible. Sizes are reported as-is: nothing in this
/// crate validates or clamps them.
///
/// # Examples
///
/// A host backed by some other windowing layer:
///
/// ```
/// use std::cell::{Cell, RefCell};
/// use std::rc::Rc;
/// use resize_driver::core::host::{HostCallback, HostHandle, ResizeHost};
/// use resize_driver::core::resize::{make_resize_driver, ResizeDelta, ResizeSource};
///
/// #[derive(Default)]
/// struct Canvas {
///     size: Cell<(u32, u32)>,
///     callbacks: RefCell<Vec<(HostHandle, HostCallback)>>,
///     next_id: Cell<u64>,
/// }
///
/// impl Canvas {
///     fn set(&self, width: u32, height: u32) {
///         self.size.set((width, height));
///         for (_, callback) in self.callbacks.borrow_mut().iter_mut() {
///             callback();
///         }
///     }
/// }
///
/// impl ResizeHost for Canvas {
///     fn subscribe(&self, callback: HostCallback) -> HostHandle {
///         let handle = HostHandle::new(self.next_id.get());
///         self.next_id.set(handle.id() + 1);
///         self.callbacks.borrow_mut().push((handle, callback));
///         handle
///     }
///
///     fn unsubscribe(&self, handle: HostHandle) {
///         self.callbacks.borrow_mut().retain(|(h, _)| *h != handle);
///     }
///
///     fn current_width(&self) -> u32 {
///         self.size.get().0
///     }
///
///     fn current_height(&self) -> u32 {
///         self.size.get().1
///     }
/// }
///
/// let canvas = Rc::new(Canvas::default());
/// let driver = make_resize_driver(canvas.clone());
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let _sub = driver().resize().subscribe(move |d| sink.borrow_mut().push(d));
///
/// canvas.set(640, 480);
/// canvas.set(700, 400);
/// assert_eq!(*seen.borrow(), vec![ResizeDelta::new(60, -80)]);
/// ```
pub trait ResizeHost {
    /// Registers `callback` to run on every resize notification.
    fn subscribe(&self, callback: HostCallback) -> HostHandle;

    /// Deregisters a callback. Unknown handles are ignored.
    fn unsubscribe(&self, handle: HostHandle);

    /// Current viewport width, read synchronously.
    fn current_width(&self) -> u32;

    /// Current viewport height, read synchronously.
    fn current_height(&self) -> u32;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::core::resize::{LiveResizeSource, ResizeDelta, ResizeSource};

    /// Minimal host that only uses the public handle constructor.
    #[derive(Default)]
    struct FixedSlotHost {
        size: Cell<(u32, u32)>,
        callback: RefCell<Option<HostCallback>>,
    }

    impl FixedSlotHost {
        fn fire(&self, width: u32, height: u32) {
            self.size.set((width, height));
            if let Some(callback) = self.callback.borrow_mut().as_mut() {
                callback();
            }
        }
    }

    impl ResizeHost for FixedSlotHost {
        fn subscribe(&self, callback: HostCallback) -> HostHandle {
            *self.callback.borrow_mut() = Some(callback);
            HostHandle::from(42)
        }

        fn unsubscribe(&self, handle: HostHandle) {
            if handle == HostHandle::new(42) {
                *self.callback.borrow_mut() = None;
            }
        }

        fn current_width(&self) -> u32 {
            self.size.get().0
        }

        fn current_height(&self) -> u32 {
            self.size.get().1
        }
    }

    #[test]
    fn handle_round_trips_its_id() {
        assert_eq!(HostHandle::new(7).id(), 7);
        assert_eq!(HostHandle::from(7), HostHandle::new(7));
    }

    #[test]
    fn custom_host_drives_live_source() {
        let host = Rc::new(FixedSlotHost::default());
        let source = LiveResizeSource::new(host.clone());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = source.resize().subscribe(move |d| sink.borrow_mut().push(d));
        assert!(host.callback.borrow().is_some(), "Source must register with the host");

        host.fire(300, 200);
        host.fire(320, 180);
        assert_eq!(*seen.borrow(), vec![ResizeDelta::new(20, -20)]);

        sub.unsubscribe();
        assert!(host.callback.borrow().is_none(), "Source must release its handle");
    }
}
