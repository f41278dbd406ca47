//=========================================================================
// Listener
//=========================================================================
//
// Consumer side of an event stream.
//
// Any `FnMut(T)` closure is a listener. Types that also care about
// completion implement the trait directly.
//
//=========================================================================

/// Receives values pushed by an [`EventStream`](super::EventStream).
pub trait Listener<T> {
    /// Called once per emitted value, in emission order.
    fn next(&mut self, value: T);

    /// Called when the stream completes. No value follows.
    fn complete(&mut self) {}
}

impl<T, F> Listener<T> for F
where
    F: FnMut(T),
{
    fn next(&mut self, value: T) {
        self(value)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
