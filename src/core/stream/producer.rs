//=========================================================================
// Producer
//=========================================================================
//
// Source side of an event stream.
//
// Lifecycle:
//   first listener  → start(sink)
//   last listener   → stop()
//   next listener   → start(sink) again (fresh run)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Sink;

//=== Producer ============================================================

/// Feeds values into a stream while it has at least one listener.
///
/// `start` and `stop` always alternate. A producer may emit synchronously
/// from inside `start` (see [`EventStream::from_iter`](super::EventStream::from_iter)).
pub trait Producer<T> {
    /// Begins producing. Values go to `sink` until `stop` is called.
    fn start(&mut self, sink: Sink<T>);

    /// Releases whatever `start` acquired.
    fn stop(&mut self);
}

//=== Built-in Producers ==================================================

/// Emits a fixed list of values, then completes. Replays on every start.
pub(super) struct IterProducer<T> {
    items: Vec<T>,
}

impl<T> IterProducer<T> {
    pub(super) fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Clone + 'static> Producer<T> for IterProducer<T> {
    fn start(&mut self, sink: Sink<T>) {
        for item in &self.items {
            sink.next(item.clone());
        }
        sink.complete();
    }

    fn stop(&mut self) {}
}

/// Never emits and never completes.
pub(super) struct NeverProducer;

impl<T> Producer<T> for NeverProducer {
    fn start(&mut self, _sink: Sink<T>) {}

    fn stop(&mut self) {}
}
