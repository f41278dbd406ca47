//=========================================================================
// Resize
//=========================================================================
//
// Window resize notifications as a stream of relative size deltas.
//
// Pipeline:
//   ResizeHost → adapter (RawSizeSnapshot) → delta (ResizeDelta) → ResizeSource
//
// Components:
// - `event`: snapshot and delta types
// - `adapter`: host callback → snapshot stream
// - `delta`: pairwise differ, as a tracker, an iterator and a stream operator
// - `source`: live and mock sources behind the `ResizeSource` trait
// - `driver`: factory producing one live source per call
//
//=========================================================================

//=== Module Declarations =================================================

mod adapter;
mod delta;
mod driver;
mod event;
mod source;

//=== Public API ==========================================================

pub use delta::{delta_stream, deltas, DeltaTracker, Deltas};
pub use driver::make_resize_driver;
pub use event::{RawSizeSnapshot, ResizeDelta};
pub use source::{mock_resize_source, LiveResizeSource, MockResizeSource, ResizeSource};
