//=========================================================================
// Event Stream
//=========================================================================
//
// Push-based, lazily started stream with explicit subscriptions.
//
// Architecture:
// ```text
//   Producer ──start(sink)──> Sink ──next()──> [Listener, Listener, ...]
//       ↑                                             │
//       └──────────── stop() ◄── last Subscription dropped
// ```
//
// Single-threaded: state lives behind `Rc<RefCell<..>>`. No borrow is held
// while calling out to a producer or listener, so callbacks may subscribe,
// unsubscribe or emit without tripping the `RefCell`.
//
// Ownership: handles and subscriptions own the state, sinks only point at
// it. A live subscription keeps its stream (and through a derived stream's
// producer, every upstream stream) alive after the handles are gone.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::listener::Listener;
use super::producer::{IterProducer, NeverProducer, Producer};

//=== Shared State ========================================================

type ListenerId = u64;
type SharedListener<T> = Rc<RefCell<dyn Listener<T>>>;

struct StreamState<T> {
    listeners: Vec<(ListenerId, SharedListener<T>)>,

    /// `None` while the producer is checked out for `start`/`stop`.
    producer: Option<Box<dyn Producer<T>>>,

    /// True from the first subscription until the last one goes away.
    running: bool,

    /// Set when a subscriber arrives while the producer is checked out after
    /// the previous run went idle. The producer restarts once checked back in.
    restart_pending: bool,

    next_id: ListenerId,
}

impl<T> StreamState<T> {
    fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }
}

//=== EventStream =========================================================

/// A lazy sequence of values delivered to subscribed listeners.
///
/// Cloning the handle is cheap and every clone refers to the same stream.
/// The producer runs only while at least one [`Subscription`] is alive:
/// the first subscriber starts it, the last one to leave stops it, and a
/// later subscriber starts a fresh run.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use resize_driver::core::stream::EventStream;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// let stream = EventStream::from_iter([1, 2, 3]).map(|v| v * 10);
/// let _subscription = stream.subscribe(move |v| sink.borrow_mut().push(v));
///
/// assert_eq!(*seen.borrow(), vec![10, 20, 30]);
/// ```
pub struct EventStream<T> {
    state: Rc<RefCell<StreamState<T>>>,
}

impl<T: Clone + 'static> EventStream<T> {
    //--- Construction -----------------------------------------------------

    /// Creates a stream driven by `producer`.
    pub fn create<P>(producer: P) -> Self
    where
        P: Producer<T> + 'static,
    {
        Self {
            state: Rc::new(RefCell::new(StreamState {
                listeners: Vec::new(),
                producer: Some(Box::new(producer)),
                running: false,
                restart_pending: false,
                next_id: 0,
            })),
        }
    }

    /// Creates a cold stream that emits `items` and completes, on every start.
    pub fn from_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::create(IterProducer::new(items.into_iter().collect()))
    }

    /// A stream that never emits.
    pub fn never() -> Self {
        Self::create(NeverProducer)
    }

    /// A stream that completes immediately.
    pub fn empty() -> Self {
        Self::from_iter(Vec::new())
    }

    //--- Subscription -----------------------------------------------------

    /// Registers `listener` and starts the producer if it is idle.
    ///
    /// The listener only sees values emitted after this call returns control
    /// to the producer; nothing is buffered or replayed.
    pub fn subscribe<L>(&self, listener: L) -> Subscription
    where
        L: Listener<T> + 'static,
    {
        let shared: SharedListener<T> = Rc::new(RefCell::new(listener));

        let (id, should_start) = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, shared));
            let should_start = !state.running;
            state.running = true;
            (id, should_start)
        };

        let state = Rc::clone(&self.state);
        let subscription = Subscription::new(move || detach(&state, id));

        if should_start {
            start_producer(&self.state);
        }

        subscription
    }

    //--- Operators --------------------------------------------------------

    /// Derives a stream that applies `f` to every value.
    ///
    /// The derived stream subscribes to `self` only while it has listeners
    /// of its own.
    pub fn map<U, F>(&self, f: F) -> EventStream<U>
    where
        U: Clone + 'static,
        F: FnMut(T) -> U + 'static,
    {
        EventStream::create(MapProducer {
            upstream: self.clone(),
            f: Rc::new(RefCell::new(f)),
            subscription: None,
        })
    }

    //--- Query API --------------------------------------------------------

    /// Number of listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// True while the producer is running.
    pub fn is_active(&self) -> bool {
        self.state.borrow().running
    }

}

impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T> fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EventStream")
            .field("listeners", &state.listeners.len())
            .field("running", &state.running)
            .finish()
    }
}

//--- Producer Lifecycle --------------------------------------------------

fn start_producer<T: Clone + 'static>(state: &Rc<RefCell<StreamState<T>>>) {
    let mut producer = {
        let mut state = state.borrow_mut();
        match state.producer.take() {
            Some(producer) => producer,
            None => {
                // Checked out by an enclosing start/stop: let it restart us.
                state.restart_pending = true;
                return;
            }
        }
    };

    trace!(target: "resize::stream", "Starting producer");
    producer.start(Sink {
        state: Rc::downgrade(state),
    });

    // A synchronous producer may complete, or lose its last listener,
    // before `start` returns. A listener may also have resubscribed after
    // that, which needs a fresh run.
    let (idle, restart) = {
        let mut state = state.borrow_mut();
        state.producer = Some(producer);
        let restart = std::mem::take(&mut state.restart_pending);
        (!state.running, restart)
    };

    if idle || restart {
        stop_producer(state);
    }
    if !idle && restart {
        start_producer(state);
    }
}

fn stop_producer<T: Clone + 'static>(state: &Rc<RefCell<StreamState<T>>>) {
    let producer = state.borrow_mut().producer.take();
    let Some(mut producer) = producer else {
        return;
    };

    trace!(target: "resize::stream", "Stopping producer");
    producer.stop();

    let restart = {
        let mut state = state.borrow_mut();
        state.producer = Some(producer);
        std::mem::take(&mut state.restart_pending) && state.running
    };

    if restart {
        start_producer(state);
    }
}

//--- Teardown ------------------------------------------------------------

fn detach<T: Clone + 'static>(state: &Rc<RefCell<StreamState<T>>>, id: ListenerId) {
    let (removed, now_idle) = {
        let mut state = state.borrow_mut();
        let removed = state
            .listeners
            .iter()
            .position(|(lid, _)| *lid == id)
            .map(|pos| state.listeners.remove(pos));

        let now_idle = removed.is_some() && state.listeners.is_empty() && state.running;
        if now_idle {
            state.running = false;
        }
        (removed, now_idle)
    };

    if now_idle {
        stop_producer(state);
    }

    // Dropped last: the listener may own subscriptions of its own.
    drop(removed);
}

//=== Sink ================================================================

/// Write end of a stream, handed to a [`Producer`] on start.
///
/// Holds only a weak reference: once every [`EventStream`] handle and every
/// [`Subscription`] is gone the sink silently discards values.
pub struct Sink<T> {
    state: Weak<RefCell<StreamState<T>>>,
}

impl<T: Clone + 'static> Sink<T> {
    /// Delivers `value` to every listener registered right now.
    pub fn next(&self, value: T) {
        let Some(state) = self.state.upgrade() else {
            return;
        };

        let targets: Vec<(ListenerId, SharedListener<T>)> = state
            .borrow()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in targets {
            // Skip listeners removed by an earlier callback in this dispatch.
            if !state.borrow().contains(id) {
                continue;
            }

            match listener.try_borrow_mut() {
                Ok(mut listener) => listener.next(value.clone()),
                Err(_) => {
                    warn!(target: "resize::stream", "Reentrant emission to listener {} dropped", id);
                }
            }
        }
    }

    /// Completes the stream: removes every listener, stops the producer,
    /// then notifies the removed listeners.
    pub fn complete(&self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };

        let listeners = {
            let mut state = state.borrow_mut();
            state.running = false;
            std::mem::take(&mut state.listeners)
        };

        trace!(target: "resize::stream", "Completing stream ({} listeners)", listeners.len());

        // The run ends before listeners hear about it, so one that
        // resubscribes from `complete` gets a fresh run.
        stop_producer(&state);

        for (_, listener) in &listeners {
            if let Ok(mut listener) = listener.try_borrow_mut() {
                listener.complete();
            }
        }

        drop(listeners);
    }
}

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self {
        Self {
            state: Weak::clone(&self.state),
        }
    }
}

impl<T> fmt::Debug for Sink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("attached", &(self.state.strong_count() > 0))
            .finish()
    }
}

//=== Subscription ========================================================

/// Handle tying a listener to a stream.
///
/// Dropping the handle unsubscribes, same as [`Subscription::unsubscribe`].
/// Until then it keeps the stream alive, even if every [`EventStream`]
/// handle to it has been dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Removes the listener. Stops the producer if no listener remains.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}

//=== Map Operator ========================================================

struct MapProducer<T, F> {
    upstream: EventStream<T>,
    f: Rc<RefCell<F>>,
    subscription: Option<Subscription>,
}

struct MapListener<F, U> {
    f: Rc<RefCell<F>>,
    sink: Sink<U>,
}

impl<T, U, F> Listener<T> for MapListener<F, U>
where
    U: Clone + 'static,
    F: FnMut(T) -> U,
{
    fn next(&mut self, value: T) {
        let mapped = (*self.f.borrow_mut())(value);
        self.sink.next(mapped);
    }

    fn complete(&mut self) {
        self.sink.complete();
    }
}

impl<T, U, F> Producer<U> for MapProducer<T, F>
where
    T: Clone + 'static,
    U: Clone + 'static,
    F: FnMut(T) -> U + 'static,
{
    fn start(&mut self, sink: Sink<U>) {
        self.subscription = Some(self.upstream.subscribe(MapListener {
            f: Rc::clone(&self.f),
            sink,
        }));
    }

    fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
