//=========================================================================
// Host Environment
//=========================================================================
//
// The window-side collaborator of the resize adapter.
//
// The adapter depends only on the `ResizeHost` trait, so a real window
// (see the windowed runner) and a test viewport are interchangeable.
//
// Components:
// - `interface`: `ResizeHost`, `HostHandle`, `HostCallback` (the contract)
// - `registry`: callback bookkeeping shared by host implementations
// - `viewport`: in-process host driven by explicit size updates
//
//=========================================================================

//=== Module Declarations =================================================

mod interface;
mod registry;
mod viewport;

//=== Public API ==========================================================

pub use interface::{HostCallback, HostHandle, ResizeHost};
pub use viewport::Viewport;
