//! Reference mesh consolidation.
//!
//! [`QuadMeshCombiner`] turns every visible face of every unit of a chunk into
//! one quad and groups the quads into one batch per material. No faces are
//! merged; hidden faces produce no geometry.
//!
//! # Usage
//! ```
//! use voxel_terrain::engine_state::rendering::{meshing::QuadMeshCombiner, MeshCombiner};
//! use voxel_terrain::engine_state::voxels::chunk::Chunk;
//! use cgmath::Point3;
//!
//! let chunk = Chunk::new(Point3::new(0, 0, 0), 4);
//! let mut combiner = QuadMeshCombiner::new();
//! combiner.combine_mesh_with_materials(chunk.root());
//! assert_eq!(combiner.mesh_at(Point3::new(0, 0, 0)).map(|m| m.face_count()), Some(0));
//! ```

use std::collections::HashMap;

use cgmath::Point3;
use log::debug;

use super::MeshCombiner;
use crate::engine_state::voxels::chunk::ChunkRoot;

mod face;
mod mesh;

pub use face::Face;
pub use mesh::{CombinedMesh, MeshBatch};

/// Keeps the latest combined mesh of every chunk, keyed by chunk anchor.
#[derive(Debug, Default)]
pub struct QuadMeshCombiner {
    meshes: HashMap<Point3<i32>, CombinedMesh>,
}

impl QuadMeshCombiner {
    /// Creates a combiner holding no meshes.
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest mesh combined for the chunk at `anchor`.
    pub fn mesh_at(&self, anchor: Point3<i32>) -> Option<&CombinedMesh> {
        self.meshes.get(&anchor)
    }

    /// Drops the mesh of an unloaded chunk.
    pub fn remove_mesh_at(&mut self, anchor: Point3<i32>) -> Option<CombinedMesh> {
        self.meshes.remove(&anchor)
    }

    /// Number of chunks with a mesh.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Returns `true` if no mesh has been combined yet.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl MeshCombiner for QuadMeshCombiner {
    fn combine_mesh_with_materials(&mut self, root: ChunkRoot<'_>) {
        let mut mesh = CombinedMesh::new(root.anchor);
        for unit in root.units.iter() {
            for side in unit.faces().visible_sides() {
                mesh.add_face(&Face::new(unit.position, unit.material, side));
            }
        }
        debug!(
            "Combined mesh for chunk at {:?}: {} faces in {} batches",
            root.anchor,
            mesh.face_count(),
            mesh.batches().count()
        );
        self.meshes.insert(root.anchor, mesh);
    }

    fn release(&mut self, anchor: Point3<i32>) {
        if self.remove_mesh_at(anchor).is_some() {
            debug!("Released mesh of chunk at {:?}", anchor);
        }
    }
}
