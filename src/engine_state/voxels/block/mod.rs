//! # Block Module
//!
//! This module provides the per-voxel pieces of the terrain: block types, block
//! faces, the template a visible voxel is instantiated from, and the renderable
//! unit that results.

use block_side::BlockSide;
use block_type::BlockType;
use cgmath::Point3;
use serde::{Deserialize, Serialize};

pub mod block_side;
pub mod block_type;

/// Visual template for a single solid voxel.
///
/// Every renderable unit in a chunk is a copy of this template placed at a cell
/// position. The template has six face sub-parts named after [`BlockSide::name`];
/// each unit can show or hide them independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxelTemplate {
    /// Human-readable template name, used in logs and errors.
    pub name: String,
    /// Type of block the template represents. Must be solid.
    pub block_type: BlockType,
    /// Material the mesh combiner batches this voxel's faces under.
    pub material: u32,
}

impl Default for VoxelTemplate {
    fn default() -> Self {
        Self {
            name: "dirt".to_string(),
            block_type: BlockType::DIRT,
            material: 0,
        }
    }
}

/// Visibility flags for the six faces of a renderable unit, indexed by [`BlockSide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceVisibility {
    visible: [bool; 6],
}

impl FaceVisibility {
    /// Every face shown.
    pub const ALL: FaceVisibility = FaceVisibility { visible: [true; 6] };

    /// Every face hidden.
    pub const NONE: FaceVisibility = FaceVisibility { visible: [false; 6] };

    /// Returns whether the given face is shown.
    pub fn is_visible(&self, side: BlockSide) -> bool {
        self.visible[side as usize]
    }

    /// Shows or hides a single face.
    pub fn set_visible(&mut self, side: BlockSide, visible: bool) {
        self.visible[side as usize] = visible;
    }

    /// Hides every face flagged in `occluded` and returns how many faces were
    /// switched off by this call.
    ///
    /// # Arguments
    /// * `occluded` - Occlusion flags in [`BlockSide`] order, as produced by
    ///   [`occluded_faces`](crate::engine_state::voxels::culling::occluded_faces)
    pub fn hide_occluded(&mut self, occluded: &[bool; 6]) -> u32 {
        let mut hidden = 0;
        for side in BlockSide::all() {
            if occluded[side as usize] && self.is_visible(side) {
                self.set_visible(side, false);
                hidden += 1;
            }
        }
        hidden
    }

    /// Iterates over the faces that are currently shown, in [`BlockSide`] order.
    pub fn visible_sides(&self) -> impl Iterator<Item = BlockSide> + '_ {
        BlockSide::all()
            .into_iter()
            .filter(move |side| self.is_visible(*side))
    }

    /// Number of faces currently shown.
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|visible| **visible).count()
    }
}

impl Default for FaceVisibility {
    fn default() -> Self {
        FaceVisibility::ALL
    }
}

/// The visual instance of one visible solid cell.
///
/// A unit is exclusively owned by its chunk's unit map until it is replaced or
/// the chunk is unloaded. Faces are hidden rather than removed, so a face can be
/// switched back on if the neighbour that occluded it ever goes away.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableUnit {
    /// World-space position of the unit's minimum corner.
    pub position: Point3<i32>,
    /// Block type copied from the template.
    pub block_type: BlockType,
    /// Material copied from the template.
    pub material: u32,
    faces: FaceVisibility,
}

impl RenderableUnit {
    /// Instantiates the template at a world position with every face shown.
    pub fn instantiate(template: &VoxelTemplate, position: Point3<i32>) -> Self {
        Self {
            position,
            block_type: template.block_type,
            material: template.material,
            faces: FaceVisibility::ALL,
        }
    }

    /// Current face visibility.
    pub fn faces(&self) -> &FaceVisibility {
        &self.faces
    }

    /// Returns whether the given face is shown.
    pub fn is_face_visible(&self, side: BlockSide) -> bool {
        self.faces.is_visible(side)
    }

    /// Hides a single face.
    pub fn hide_face(&mut self, side: BlockSide) {
        self.faces.set_visible(side, false);
    }

    /// Shows a single face again.
    pub fn show_face(&mut self, side: BlockSide) {
        self.faces.set_visible(side, true);
    }

    /// Hides every occluded face; see [`FaceVisibility::hide_occluded`].
    pub fn hide_occluded_faces(&mut self, occluded: &[bool; 6]) -> u32 {
        self.faces.hide_occluded(occluded)
    }
}
