//=========================================================================
// Resize Event Types
//
// Absolute viewport readings and the relative deltas derived from them.
//
// Responsibilities:
// - Represent one absolute size reading (`RawSizeSnapshot`)
// - Represent the signed change between two readings (`ResizeDelta`)
// - Keep delta arithmetic exact for any pair of `u32` dimensions
//
//=========================================================================

use std::iter::Sum;
use std::ops::{Add, AddAssign};

//=== RawSizeSnapshot =====================================================

/// Absolute viewport dimensions at one instant.
///
/// Produced once per native resize notification and kept only until the
/// next one arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawSizeSnapshot {
    pub width: u32,
    pub height: u32,
}

impl RawSizeSnapshot {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

//=== ResizeDelta =========================================================

/// Signed change in width and height between two consecutive snapshots.
///
/// `i64` holds the difference of any two `u32` values without overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResizeDelta {
    pub delta_x: i64,
    pub delta_y: i64,
}

impl ResizeDelta {
    pub const ZERO: Self = Self { delta_x: 0, delta_y: 0 };

    pub const fn new(delta_x: i64, delta_y: i64) -> Self {
        Self { delta_x, delta_y }
    }

    /// `to - from`, per axis.
    pub fn between(from: RawSizeSnapshot, to: RawSizeSnapshot) -> Self {
        Self {
            delta_x: i64::from(to.width) - i64::from(from.width),
            delta_y: i64::from(to.height) - i64::from(from.height),
        }
    }
}

//--- Arithmetic ----------------------------------------------------------
//
// Deltas accumulate: the sum over a run of consecutive deltas equals the
// delta between the first and last snapshot.
//

impl Add for ResizeDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            delta_x: self.delta_x + rhs.delta_x,
            delta_y: self.delta_y + rhs.delta_y,
        }
    }
}

impl AddAssign for ResizeDelta {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ResizeDelta {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<(i64, i64)> for ResizeDelta {
    fn from((delta_x, delta_y): (i64, i64)) -> Self {
        Self { delta_x, delta_y }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
