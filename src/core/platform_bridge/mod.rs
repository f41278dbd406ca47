//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the window thread (winit) with the consumer thread.
//
// This module defines the contract between the platform implementation
// and the code consuming deltas, so the windowing backend can change
// without touching either side.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Sending and receiving ends of the channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{DeltaForwarder, EventCollector};
pub(crate) use interface::RunnerEvent;
pub use interface::RunnerError;
