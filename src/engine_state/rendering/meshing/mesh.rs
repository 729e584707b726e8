//! Per-material vertex and index batches of a combined chunk mesh.

use std::collections::BTreeMap;

use cgmath::Point3;

use super::face::Face;
use crate::engine_state::rendering::Vertex;

/// UV coordinates of the `ll`, `lr`, `ul`, `ur` corners of a quad.
const QUAD_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]];

/// Vertices and indices of every face drawn with one material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBatch {
    /// Material shared by every face in the batch
    pub material: u32,
    /// Four vertices per face
    pub vertices: Vec<Vertex>,
    /// Six indices (two triangles) per face
    pub indices: Vec<u32>,
}

impl MeshBatch {
    /// Creates an empty batch for a material.
    pub fn new(material: u32) -> Self {
        MeshBatch {
            material,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Appends one face as a quad.
    pub fn push_face(&mut self, face: &Face) {
        let first = self.vertices.len() as u32;
        for (corner, [u, v]) in face.corners().into_iter().zip(QUAD_TEX_COORDS) {
            self.vertices
                .push(Vertex::new(corner, face.material, u, v, face.block_side));
        }
        self.indices.extend(generate_face_indices(first));
    }

    /// Number of quads in the batch.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// The vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Index data for the quad whose first vertex is `first`.
///
/// The two triangles are `ll, lr, ur` and `ll, ur, ul`.
fn generate_face_indices(first: u32) -> [u32; 6] {
    [first, first + 1, first + 3, first, first + 3, first + 2]
}

/// The consolidated mesh of one chunk, one batch per material.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedMesh {
    /// Anchor of the chunk the mesh was built from
    pub anchor: Point3<i32>,
    batches: BTreeMap<u32, MeshBatch>,
}

impl CombinedMesh {
    /// Creates an empty mesh for a chunk.
    pub fn new(anchor: Point3<i32>) -> Self {
        CombinedMesh {
            anchor,
            batches: BTreeMap::new(),
        }
    }

    /// Adds a face to the batch of its material.
    pub fn add_face(&mut self, face: &Face) {
        self.batches
            .entry(face.material)
            .or_insert_with(|| MeshBatch::new(face.material))
            .push_face(face);
    }

    /// Batches in ascending material order.
    pub fn batches(&self) -> impl Iterator<Item = &MeshBatch> + '_ {
        self.batches.values()
    }

    /// The batch of one material.
    pub fn batch(&self, material: u32) -> Option<&MeshBatch> {
        self.batches.get(&material)
    }

    /// Total number of quads across all materials.
    pub fn face_count(&self) -> usize {
        self.batches.values().map(MeshBatch::face_count).sum()
    }
}
