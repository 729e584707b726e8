//! Mesh consolidation for generated chunks.
//!
//! Terrain generation does not render anything itself. When a chunk's
//! generation pass completes, its units are handed to a [`MeshCombiner`], which
//! merges them into whatever representation the host renders from.
//! [`meshing::QuadMeshCombiner`] is the bundled implementation.

use cgmath::Point3;

use super::voxels::chunk::ChunkRoot;

pub mod meshing;
mod vertex;

pub use vertex::Vertex;

/// Consumer of finished chunks.
///
/// Called exactly once per completed generation pass, including passes that
/// only re-consolidate an already built chunk.
pub trait MeshCombiner {
    /// Merges the units under `root` into per-material meshes.
    fn combine_mesh_with_materials(&mut self, root: ChunkRoot<'_>);

    /// Drops whatever was combined for the chunk at `anchor`. Called once
    /// when the chunk is unloaded.
    fn release(&mut self, _anchor: Point3<i32>) {}
}
