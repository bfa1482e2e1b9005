//! Axes and the 3D rotation group of a cube.
//!
//! A cube has 24 possible orientations in 3D space (the rotation group of a cube).
//! These are the 6 ways to choose which face points up, times 4 rotations around
//! the vertical axis. None of them is a reflection, so rotating an arrangement by
//! any of them never changes the set of silhouettes it can show.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A signed 3D coordinate, centered or not.
pub type Coord = (i32, i32, i32);

/// One of the three grid axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the axis in an `(x, y, z)` triple.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Number of distinct cube orientations.
pub const NUM_ROTATIONS: usize = 24;

/// All 24 rotation functions for a cube.
///
/// Organized as 6 face-up choices x 4 rotations around vertical:
/// - Rotations 0-3: +Z face up
/// - Rotations 4-7: +Y face up
/// - Rotations 8-11: -Z face up
/// - Rotations 12-15: -Y face up
/// - Rotations 16-19: +X face up
/// - Rotations 20-23: -X face up
pub const ROTATIONS: [fn(Coord) -> Coord; NUM_ROTATIONS] = [
    // +Z face up (identity orientation), rotate around Z axis
    |(x, y, z)| (x, y, z),   // 0 degrees
    |(x, y, z)| (-y, x, z),  // 90 degrees
    |(x, y, z)| (-x, -y, z), // 180 degrees
    |(x, y, z)| (y, -x, z),  // 270 degrees
    // +Y face up, rotate around Y axis
    |(x, y, z)| (x, -z, y),
    |(x, y, z)| (z, x, y),
    |(x, y, z)| (-x, z, y),
    |(x, y, z)| (-z, -x, y),
    // -Z face up, rotate around Z axis
    |(x, y, z)| (x, -y, -z),
    |(x, y, z)| (y, x, -z),
    |(x, y, z)| (-x, y, -z),
    |(x, y, z)| (-y, -x, -z),
    // -Y face up, rotate around Y axis
    |(x, y, z)| (x, z, -y),
    |(x, y, z)| (-z, x, -y),
    |(x, y, z)| (-x, -z, -y),
    |(x, y, z)| (z, -x, -y),
    // +X face up, rotate around X axis
    |(x, y, z)| (z, y, -x),
    |(x, y, z)| (-y, z, -x),
    |(x, y, z)| (-z, -y, -x),
    |(x, y, z)| (y, -z, -x),
    // -X face up, rotate around X axis
    |(x, y, z)| (-z, y, x),
    |(x, y, z)| (-y, -z, x),
    |(x, y, z)| (z, -y, x),
    |(x, y, z)| (y, z, x),
];

/// Moves a cell of a cube with `side` cells per edge through rotation `rotation`.
///
/// The rotation is applied around the cube's center. Doubled centered
/// coordinates keep both odd and even sides on integers: `center_doubled = side - 1`.
pub fn rotate_cell(rotation: usize, (x, y, z): (usize, usize, usize), side: usize) -> (usize, usize, usize) {
    let side_m1 = side as i32 - 1;
    let centered = (
        2 * x as i32 - side_m1,
        2 * y as i32 - side_m1,
        2 * z as i32 - side_m1,
    );
    let (rx, ry, rz) = ROTATIONS[rotation](centered);

    // convert back from doubled coords to grid indices
    (
        ((rx + side_m1) / 2) as usize,
        ((ry + side_m1) / 2) as usize,
        ((rz + side_m1) / 2) as usize,
    )
}
