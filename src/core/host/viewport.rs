//=========================================================================
// Viewport
//=========================================================================
//
// In-process `ResizeHost`: holds the current size and fires registered
// callbacks when told the size changed.
//
// The windowed runner feeds it from winit `Resized` events; tests drive
// it directly with `resize_to()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::fmt;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::interface::{HostCallback, HostHandle, ResizeHost};
use super::registry::CallbackRegistry;
use crate::core::resize::RawSizeSnapshot;

//=== Viewport ============================================================

/// A resizable viewport that notifies registered callbacks.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use resize_driver::core::host::{ResizeHost, Viewport};
///
/// let viewport = Rc::new(Viewport::new(1200, 800));
/// let handle = viewport.subscribe(Box::new(|| println!("resized")));
///
/// viewport.resize_to(1300, 800);
/// assert_eq!(viewport.current_width(), 1300);
///
/// viewport.unsubscribe(handle);
/// assert_eq!(viewport.listener_count(), 0);
/// ```
pub struct Viewport {
    size: Cell<RawSizeSnapshot>,
    callbacks: CallbackRegistry,
}

impl Viewport {
    //--- Construction -----------------------------------------------------

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Cell::new(RawSizeSnapshot::new(width, height)),
            callbacks: CallbackRegistry::new(),
        }
    }

    //--- Size Updates -----------------------------------------------------

    /// Stores the new size, then notifies every registered callback.
    ///
    /// Fires even if the size did not change, like a native resize event.
    pub fn resize_to(&self, width: u32, height: u32) {
        trace!(target: "resize::host", "Viewport resized to {}x{}", width, height);
        self.size.set(RawSizeSnapshot::new(width, height));
        self.callbacks.notify();
    }

    /// Stores the new size without notifying anyone.
    pub fn set_size(&self, width: u32, height: u32) {
        self.size.set(RawSizeSnapshot::new(width, height));
    }

    //--- Query API --------------------------------------------------------

    pub fn size(&self) -> RawSizeSnapshot {
        self.size.get()
    }

    /// Number of callbacks currently registered.
    pub fn listener_count(&self) -> usize {
        self.callbacks.len()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("size", &self.size.get())
            .field("listeners", &self.callbacks.len())
            .finish()
    }
}

//=== ResizeHost ==========================================================

impl ResizeHost for Viewport {
    fn subscribe(&self, callback: HostCallback) -> HostHandle {
        let handle = self.callbacks.insert(callback);
        debug!(target: "resize::host", "Resize listener {} registered", handle.id());
        handle
    }

    fn unsubscribe(&self, handle: HostHandle) {
        if self.callbacks.remove(handle) {
            debug!(target: "resize::host", "Resize listener {} removed", handle.id());
        }
    }

    fn current_width(&self) -> u32 {
        self.size.get().width
    }

    fn current_height(&self) -> u32 {
        self.size.get().height
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
