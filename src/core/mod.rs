//=========================================================================
// Core
//
// Platform-independent resize machinery.
//
// Responsibilities:
// - Turn host resize notifications into snapshots, then into deltas
// - Expose live and mock sources behind one `ResizeSource` capability
// - Provide the push-based stream the whole pipeline is built on
//
// Notes:
// Everything here is single-threaded (`Rc`/`RefCell`). The only thread
// boundary is `platform_bridge`, which carries deltas to the runner's
// consumer thread.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod host;
pub mod mock;
pub(crate) mod platform_bridge;
pub mod resize;
pub mod stream;
