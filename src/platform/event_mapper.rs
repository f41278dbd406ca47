//=========================================================================
// Platform Event Mapper
//
// Converts Winit window geometry to core resize types.
// Provides a clean separation between OS-specific sizes and the
// crate's internal snapshot representation.
//
//=========================================================================

use winit::dpi::PhysicalSize;

use crate::core::resize::RawSizeSnapshot;

//=== Size Conversion =====================================================
//
// Winit reports physical pixels as `u32`, which maps 1:1 onto a snapshot.
//

impl From<PhysicalSize<u32>> for RawSizeSnapshot {
    fn from(size: PhysicalSize<u32>) -> Self {
        RawSizeSnapshot::new(size.width, size.height)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
