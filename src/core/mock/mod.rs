//=========================================================================
// Mock Support
//=========================================================================
//
// Deterministic inputs for testing code that consumes resize sources.
//
// Pair a `VirtualTimeline` diagram with `mock_resize_source` to script
// exactly which deltas arrive on which frame.
//
//=========================================================================

//=== Module Declarations =================================================

mod timeline;

//=== Public API ==========================================================

pub use timeline::{DiagramError, VirtualTimeline};
