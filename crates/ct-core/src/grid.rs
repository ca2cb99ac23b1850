//! Coordinate types.
//!
//! Two different spaces are in play:
//!
//! - [`GridPoint`]: an integer slot inside a transporter's cargo grid,
//!   taken from the container's spawn coordinate in the schedule.
//! - [`Position`]: a point on the terminal floor in metres, used for AGVs
//!   and waypoints.

use serde::{Deserialize, Serialize};

/// An `(x, y, z)` cargo slot.  Ordered lexicographically so grids iterate
/// deterministically.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl GridPoint {
    #[inline]
    pub fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A point on the terminal floor.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance; enough for nearest-point comparisons.
    #[inline]
    pub fn distance_2(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
