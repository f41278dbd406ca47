//=========================================================================
// Resize Adapter
//=========================================================================
//
// Bridges the host's callback-style resize notification into a stream of
// absolute size snapshots.
//
// Architecture:
//   ResizeHost ──callback──> read width/height ──> Sink<RawSizeSnapshot>
//
// One host registration per producer run: registered on start, removed on
// stop. The callback holds the host weakly so the host never owns a cycle
// back to itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::{Rc, Weak};

use log::debug;

//=== Internal Dependencies ===============================================

use super::event::RawSizeSnapshot;
use crate::core::host::{HostHandle, ResizeHost};
use crate::core::stream::{EventStream, Producer, Sink};

//=== ResizeProducer ======================================================

/// Producer of [`RawSizeSnapshot`]s backed by a [`ResizeHost`].
pub(crate) struct ResizeProducer {
    host: Rc<dyn ResizeHost>,
    handle: Option<HostHandle>,
}

impl ResizeProducer {
    pub(crate) fn new(host: Rc<dyn ResizeHost>) -> Self {
        Self { host, handle: None }
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.host.unsubscribe(handle);
            debug!(target: "resize::adapter", "Host listener {} released", handle.id());
        }
    }
}

impl Producer<RawSizeSnapshot> for ResizeProducer {
    fn start(&mut self, sink: Sink<RawSizeSnapshot>) {
        // Restart without an intervening stop would leak a registration.
        self.release();

        let host: Weak<dyn ResizeHost> = Rc::downgrade(&self.host);
        let handle = self.host.subscribe(Box::new(move || {
            if let Some(host) = host.upgrade() {
                sink.next(RawSizeSnapshot::new(host.current_width(), host.current_height()));
            }
        }));

        debug!(target: "resize::adapter", "Host listener {} registered", handle.id());
        self.handle = Some(handle);
    }

    fn stop(&mut self) {
        self.release();
    }
}

impl Drop for ResizeProducer {
    fn drop(&mut self) {
        self.release();
    }
}

//=== Constructor =========================================================

/// Snapshot stream over `host`. Registers with the host lazily.
pub(crate) fn snapshot_stream(host: Rc<dyn ResizeHost>) -> EventStream<RawSizeSnapshot> {
    EventStream::create(ResizeProducer::new(host))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::Viewport;
    use std::cell::RefCell;

    fn setup() -> (Rc<Viewport>, EventStream<RawSizeSnapshot>) {
        let viewport = Rc::new(Viewport::new(1200, 800));
        let stream = snapshot_stream(viewport.clone());
        (viewport, stream)
    }

    fn collect(
        stream: &EventStream<RawSizeSnapshot>,
    ) -> (Rc<RefCell<Vec<RawSizeSnapshot>>>, crate::core::stream::Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = stream.subscribe(move |s| sink.borrow_mut().push(s));
        (seen, sub)
    }

    #[test]
    fn registers_only_on_first_subscription() {
        let (viewport, stream) = setup();
        assert_eq!(viewport.listener_count(), 0, "No host listener before subscription");

        let (_a, _sub_a) = collect(&stream);
        let (_b, _sub_b) = collect(&stream);

        assert_eq!(viewport.listener_count(), 1, "Exactly one host listener per run");
    }

    #[test]
    fn emits_current_size_on_each_notification() {
        let (viewport, stream) = setup();
        let (seen, _sub) = collect(&stream);

        viewport.resize_to(1300, 800);
        viewport.resize_to(1300, 900);

        assert_eq!(
            *seen.borrow(),
            vec![RawSizeSnapshot::new(1300, 800), RawSizeSnapshot::new(1300, 900)]
        );
    }

    #[test]
    fn last_unsubscribe_deregisters() {
        let (viewport, stream) = setup();
        let (seen, sub) = collect(&stream);

        sub.unsubscribe();
        viewport.resize_to(1, 1);

        assert_eq!(viewport.listener_count(), 0);
        assert!(seen.borrow().is_empty(), "No snapshot after teardown");
    }

    #[test]
    fn resubscribe_registers_again() {
        let (viewport, stream) = setup();
        let (_old, sub) = collect(&stream);
        sub.unsubscribe();

        let (seen, _sub) = collect(&stream);
        assert_eq!(viewport.listener_count(), 1);

        viewport.resize_to(10, 20);
        assert_eq!(*seen.borrow(), vec![RawSizeSnapshot::new(10, 20)]);
    }

    #[test]
    fn live_subscription_outlives_stream_handle() {
        let (viewport, stream) = setup();
        let (seen, sub) = collect(&stream);

        drop(stream);
        assert_eq!(viewport.listener_count(), 1, "Subscription owns the registration");

        viewport.resize_to(1, 2);
        assert_eq!(*seen.borrow(), vec![RawSizeSnapshot::new(1, 2)]);

        drop(sub);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn dropping_idle_stream_leaves_no_registration() {
        let (viewport, stream) = setup();
        let (_seen, sub) = collect(&stream);

        sub.unsubscribe();
        drop(stream);

        assert_eq!(viewport.listener_count(), 0);
    }
}
