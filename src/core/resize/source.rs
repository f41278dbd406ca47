//=========================================================================
// Resize Sources
//=========================================================================
//
// The handle application code receives from the driver.
//
// Two independent implementations of one capability:
// - `LiveResizeSource`: host notifications → snapshots → deltas
// - `MockResizeSource`: caller-supplied delta stream, emitted verbatim
//
// The mock never touches a host, and never diffs: callers hand it deltas.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::debug;

//=== Internal Dependencies ===============================================

use super::adapter::snapshot_stream;
use super::delta::delta_stream;
use super::event::ResizeDelta;
use crate::core::host::ResizeHost;
use crate::core::stream::EventStream;

//=== ResizeSource ========================================================

/// Anything that exposes a stream of [`ResizeDelta`]s.
///
/// Application code should depend on this trait so a
/// [`MockResizeSource`] can stand in for the live one under test.
pub trait ResizeSource {
    /// The delta stream. Every call returns a handle to the same stream.
    fn resize(&self) -> EventStream<ResizeDelta>;
}

//=== LiveResizeSource ====================================================

/// Source backed by a [`ResizeHost`].
///
/// Registers with the host when its stream gains a first listener and
/// deregisters when the last one leaves. Each registration diffs from a
/// clean slate.
#[derive(Debug, Clone)]
pub struct LiveResizeSource {
    resize: EventStream<ResizeDelta>,
}

impl LiveResizeSource {
    pub fn new(host: Rc<dyn ResizeHost>) -> Self {
        debug!(target: "resize::source", "Live resize source created");
        Self {
            resize: delta_stream(snapshot_stream(host)),
        }
    }
}

impl ResizeSource for LiveResizeSource {
    fn resize(&self) -> EventStream<ResizeDelta> {
        self.resize.clone()
    }
}

//=== MockResizeSource ====================================================

/// Source whose deltas are supplied by the caller.
#[derive(Debug, Clone)]
pub struct MockResizeSource {
    resize: EventStream<ResizeDelta>,
}

impl MockResizeSource {
    pub fn new(diagram: EventStream<ResizeDelta>) -> Self {
        Self { resize: diagram }
    }
}

impl ResizeSource for MockResizeSource {
    fn resize(&self) -> EventStream<ResizeDelta> {
        self.resize.clone()
    }
}

/// Builds a [`MockResizeSource`] that emits exactly `diagram`.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use resize_driver::core::resize::{mock_resize_source, ResizeDelta, ResizeSource};
/// use resize_driver::core::stream::EventStream;
///
/// let source = mock_resize_source(EventStream::from_iter([
///     ResizeDelta::new(250, 0),
///     ResizeDelta::new(0, -150),
/// ]));
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let _sub = source.resize().subscribe(move |d| sink.borrow_mut().push(d));
///
/// assert_eq!(seen.borrow().len(), 2);
/// ```
pub fn mock_resize_source(diagram: EventStream<ResizeDelta>) -> MockResizeSource {
    MockResizeSource::new(diagram)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::Viewport;
    use crate::core::stream::Subscription;
    use proptest::prelude::*;
    use std::cell::RefCell;

    fn record(source: &dyn ResizeSource) -> (Rc<RefCell<Vec<ResizeDelta>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = source.resize().subscribe(move |d| sink.borrow_mut().push(d));
        (seen, sub)
    }

    //=====================================================================
    // LiveResizeSource Tests
    //=====================================================================

    #[test]
    fn live_source_documented_scenario() {
        let viewport = Rc::new(Viewport::new(0, 0));
        let source = LiveResizeSource::new(viewport.clone());
        let (seen, _sub) = record(&source);

        for (w, h) in [(1200, 800), (1300, 800), (1200, 800), (1200, 900), (1200, 800), (1300, 700)] {
            viewport.resize_to(w, h);
        }

        assert_eq!(
            *seen.borrow(),
            vec![
                ResizeDelta::new(100, 0),
                ResizeDelta::new(-100, 0),
                ResizeDelta::new(0, 100),
                ResizeDelta::new(0, -100),
                ResizeDelta::new(100, -100),
            ],
            "Six snapshots must yield five deltas"
        );
    }

    #[test]
    fn live_source_is_lazy() {
        let viewport = Rc::new(Viewport::new(1, 1));
        let source = LiveResizeSource::new(viewport.clone());

        assert_eq!(viewport.listener_count(), 0, "Source must not register before subscription");

        let (_seen, sub) = record(&source);
        assert_eq!(viewport.listener_count(), 1);

        sub.unsubscribe();
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn live_source_resubscription_starts_over() {
        let viewport = Rc::new(Viewport::new(0, 0));
        let source = LiveResizeSource::new(viewport.clone());

        let (_old, sub) = record(&source);
        viewport.resize_to(100, 100);
        viewport.resize_to(200, 200);
        sub.unsubscribe();

        let (seen, _sub) = record(&source);
        viewport.resize_to(300, 300);
        assert!(seen.borrow().is_empty(), "First snapshot after resubscribe must yield no delta");

        viewport.resize_to(310, 290);
        assert_eq!(*seen.borrow(), vec![ResizeDelta::new(10, -10)]);
    }

    #[test]
    fn live_source_resize_returns_shared_stream() {
        let viewport = Rc::new(Viewport::new(0, 0));
        let source = LiveResizeSource::new(viewport.clone());

        let (first, _a) = record(&source);
        let (second, _b) = record(&source);
        viewport.resize_to(10, 10);
        viewport.resize_to(20, 20);

        assert_eq!(viewport.listener_count(), 1, "Listeners of one source share one registration");
        assert_eq!(*first.borrow(), *second.borrow());
    }

    //=====================================================================
    // MockResizeSource Tests
    //=====================================================================

    #[test]
    fn mock_source_emits_verbatim() {
        let supplied = vec![
            ResizeDelta::new(250, 0),
            ResizeDelta::new(0, -150),
            ResizeDelta::new(0, -150),
        ];
        let source = mock_resize_source(EventStream::from_iter(supplied.clone()));
        let (seen, _sub) = record(&source);

        assert_eq!(*seen.borrow(), supplied, "Mock must not transform its input");
    }

    #[test]
    fn mock_source_does_not_diff() {
        // Values that a live source would treat as absolute readings.
        let supplied = vec![ResizeDelta::new(1200, 800), ResizeDelta::new(1300, 800)];
        let source = mock_resize_source(EventStream::from_iter(supplied.clone()));
        let (seen, _sub) = record(&source);

        assert_eq!(*seen.borrow(), supplied);
    }

    #[test]
    fn sources_are_interchangeable() {
        fn widths(source: &dyn ResizeSource) -> (Rc<RefCell<Vec<i64>>>, Subscription) {
            let seen = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&seen);
            let sub = source
                .resize()
                .map(|d| d.delta_x)
                .subscribe(move |x| sink.borrow_mut().push(x));
            (seen, sub)
        }

        let mock = mock_resize_source(EventStream::from_iter([ResizeDelta::new(7, 0)]));
        let (mock_seen, _mock_sub) = widths(&mock);
        assert_eq!(*mock_seen.borrow(), vec![7]);

        // Emits only after subscribing, unlike the synchronous mock above.
        let viewport = Rc::new(Viewport::new(0, 0));
        let live = LiveResizeSource::new(viewport.clone());
        let (live_seen, _live_sub) = widths(&live);
        drop(live);

        viewport.resize_to(100, 0);
        viewport.resize_to(107, 0);
        assert_eq!(*live_seen.borrow(), vec![7]);
    }

    //=====================================================================
    // Property Tests
    //=====================================================================

    fn supplied_deltas() -> impl Strategy<Value = Vec<ResizeDelta>> {
        prop::collection::vec(
            (any::<i64>(), any::<i64>()).prop_map(ResizeDelta::from),
            0..64,
        )
    }

    proptest! {
        /// Whatever the caller supplies comes out unchanged.
        #[test]
        fn mock_source_is_identity(supplied in supplied_deltas()) {
            let source = mock_resize_source(EventStream::from_iter(supplied.clone()));
            let (seen, _sub) = record(&source);

            prop_assert_eq!(&*seen.borrow(), &supplied);
        }
    }
}
