//=========================================================================
// Delta Transformer
//=========================================================================
//
// Turns consecutive absolute snapshots into relative deltas.
//
// Architecture:
//   RawSizeSnapshot stream ──> DeltaTracker (previous: Option<_>) ──> ResizeDelta stream
//
// The tracker's only state is the last snapshot seen. The first snapshot
// of a run produces nothing. Each producer run starts with a fresh tracker.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{RawSizeSnapshot, ResizeDelta};
use crate::core::stream::{EventStream, Listener, Producer, Sink, Subscription};

//=== DeltaTracker ========================================================

/// Pairwise differ over a sequence of snapshots.
#[derive(Debug, Clone, Default)]
pub struct DeltaTracker {
    previous: Option<RawSizeSnapshot>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Records `snapshot`; returns the delta from the previous one, if any.
    pub fn observe(&mut self, snapshot: RawSizeSnapshot) -> Option<ResizeDelta> {
        let delta = self
            .previous
            .map(|previous| ResizeDelta::between(previous, snapshot));
        self.previous = Some(snapshot);
        delta
    }

    /// Last snapshot recorded, if any.
    pub fn previous(&self) -> Option<RawSizeSnapshot> {
        self.previous
    }

    /// Forgets the previous snapshot.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

//=== Deltas Iterator =====================================================

/// Iterator adapter yielding the deltas of an in-memory snapshot sequence.
///
/// `n + 1` snapshots yield `n` deltas.
///
/// # Examples
///
/// ```
/// use resize_driver::core::resize::{deltas, RawSizeSnapshot, ResizeDelta};
///
/// let sizes = [
///     RawSizeSnapshot::new(1200, 800),
///     RawSizeSnapshot::new(1300, 800),
///     RawSizeSnapshot::new(1300, 700),
/// ];
///
/// let out: Vec<_> = deltas(sizes).collect();
/// assert_eq!(out, vec![ResizeDelta::new(100, 0), ResizeDelta::new(0, -100)]);
/// ```
#[derive(Debug, Clone)]
pub struct Deltas<I> {
    snapshots: I,
    tracker: DeltaTracker,
}

impl<I> Iterator for Deltas<I>
where
    I: Iterator<Item = RawSizeSnapshot>,
{
    type Item = ResizeDelta;

    fn next(&mut self) -> Option<ResizeDelta> {
        for snapshot in self.snapshots.by_ref() {
            if let Some(delta) = self.tracker.observe(snapshot) {
                return Some(delta);
            }
        }
        None
    }
}

/// Diffs consecutive snapshots of `snapshots`.
pub fn deltas<I>(snapshots: I) -> Deltas<I::IntoIter>
where
    I: IntoIterator<Item = RawSizeSnapshot>,
{
    Deltas {
        snapshots: snapshots.into_iter(),
        tracker: DeltaTracker::new(),
    }
}

//=== DeltaTransformer ====================================================

/// Stream operator: subscribes to a snapshot stream for as long as it has
/// listeners and re-emits the pairwise deltas.
pub(crate) struct DeltaTransformer {
    snapshots: EventStream<RawSizeSnapshot>,
    subscription: Option<Subscription>,
}

impl DeltaTransformer {
    pub(crate) fn new(snapshots: EventStream<RawSizeSnapshot>) -> Self {
        Self {
            snapshots,
            subscription: None,
        }
    }
}

struct DeltaListener {
    tracker: DeltaTracker,
    sink: Sink<ResizeDelta>,
}

impl Listener<RawSizeSnapshot> for DeltaListener {
    fn next(&mut self, snapshot: RawSizeSnapshot) {
        if let Some(delta) = self.tracker.observe(snapshot) {
            self.sink.next(delta);
        }
    }

    fn complete(&mut self) {
        self.sink.complete();
    }
}

impl Producer<ResizeDelta> for DeltaTransformer {
    fn start(&mut self, sink: Sink<ResizeDelta>) {
        self.subscription = Some(self.snapshots.subscribe(DeltaListener {
            tracker: DeltaTracker::new(),
            sink,
        }));
    }

    fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

/// Delta stream over a snapshot stream.
pub fn delta_stream(snapshots: EventStream<RawSizeSnapshot>) -> EventStream<ResizeDelta> {
    EventStream::create(DeltaTransformer::new(snapshots))
}

//=========================================================================
// Unit Tests
//=========================================================================
