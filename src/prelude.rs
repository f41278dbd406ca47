//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use resize_driver::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runner
pub use crate::core::platform_bridge::RunnerError;
pub use crate::runner::{ResizeRunner, ResizeRunnerBuilder};

// Resize sources
pub use crate::core::resize::{
    make_resize_driver, mock_resize_source, LiveResizeSource, MockResizeSource,
    RawSizeSnapshot, ResizeDelta, ResizeSource,
};

// Host environment
pub use crate::core::host::{ResizeHost, Viewport};

// Streams
pub use crate::core::stream::{EventStream, Listener, Subscription};

// Mock timeline
pub use crate::core::mock::{DiagramError, VirtualTimeline};
