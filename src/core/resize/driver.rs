//=========================================================================
// Resize Driver
//=========================================================================
//
// Factory for live resize sources.
//
// Architecture:
// ```text
//   make_resize_driver(host) ──> driver: Fn() -> LiveResizeSource
//                                   │
//                                   ├─ call #1 → source A (own registration, own tracker)
//                                   └─ call #2 → source B (own registration, own tracker)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::source::LiveResizeSource;
use crate::core::host::ResizeHost;

//=== make_resize_driver ==================================================

/// Returns a zero-argument driver that builds a fresh [`LiveResizeSource`]
/// over `host` on every call.
///
/// Sources from separate calls share nothing but the host: each holds its
/// own host registration and its own delta state.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use resize_driver::core::host::Viewport;
/// use resize_driver::core::resize::{make_resize_driver, ResizeDelta, ResizeSource};
///
/// let viewport = Rc::new(Viewport::new(1200, 800));
/// let driver = make_resize_driver(viewport.clone());
/// let source = driver();
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let _sub = source.resize().subscribe(move |d| sink.borrow_mut().push(d));
///
/// viewport.resize_to(1200, 800);
/// viewport.resize_to(1300, 800);
///
/// assert_eq!(*seen.borrow(), vec![ResizeDelta::new(100, 0)]);
/// ```
pub fn make_resize_driver(host: Rc<dyn ResizeHost>) -> impl Fn() -> LiveResizeSource {
    move || LiveResizeSource::new(Rc::clone(&host))
}

//=========================================================================
// Unit Tests
//=========================================================================
