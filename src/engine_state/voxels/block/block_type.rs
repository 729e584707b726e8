//! # Block Type Module
//!
//! The voxel types a template can instantiate. Occupancy itself is binary;
//! the type only decides which visual representation a solid cell gets.

use serde::{Deserialize, Serialize};

/// Enumerates all block types in the voxel world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    /// An air block, which is non-solid and never rendered.
    AIR,

    /// A basic dirt block, the default terrain fill.
    #[default]
    DIRT,

    /// A grass block.
    GRASS,

    /// A stone block.
    STONE,
}

impl BlockType {
    /// Returns `true` for every type except [`BlockType::AIR`].
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }
}
