//=========================================================================
// Stream
//=========================================================================
//
// Minimal push-based stream with explicit subscription lifecycle.
//
// Components:
// - `listener`: consumer callbacks (`next`, `complete`)
// - `producer`: source callbacks (`start`, `stop`)
// - `event_stream`: the shared stream, its write end and subscriptions
//
//=========================================================================

//=== Module Declarations =================================================

mod event_stream;
mod listener;
mod producer;

//=== Public API ==========================================================

pub use event_stream::{EventStream, Sink, Subscription};
pub use listener::Listener;
pub use producer::Producer;
