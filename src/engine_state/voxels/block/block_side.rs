//! # Block Side Module
//!
//! This module defines the six faces of a voxel and the neighbour each one
//! looks at. The axis convention is `(x, y, z)` with `y` vertical everywhere in
//! the crate.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant has a fixed integer value so per-face data can live in plain
/// `[T; 6]` arrays indexed by `side as usize`.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive X)
    FRONT = 0,

    /// The back face (facing negative X)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative Z)
    LEFT = 4,

    /// The right face (facing positive Z)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Unit offset from a cell to the neighbour that can occlude this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(1, 0, 0),
            BlockSide::BACK => Vector3::new(-1, 0, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(0, 0, -1),
            BlockSide::RIGHT => Vector3::new(0, 0, 1),
        }
    }

    /// The face pointing the other way along the same axis.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::BOTTOM => BlockSide::TOP,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::LEFT,
        }
    }

    /// Name of the face sub-part on a voxel template.
    pub fn name(self) -> &'static str {
        match self {
            BlockSide::FRONT => "Front",
            BlockSide::BACK => "Back",
            BlockSide::BOTTOM => "Bottom",
            BlockSide::TOP => "Top",
            BlockSide::LEFT => "Left",
            BlockSide::RIGHT => "Right",
        }
    }
}
