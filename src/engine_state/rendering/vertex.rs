//! Vertex format emitted by the reference mesh combiner.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;

/// A vertex of a combined chunk mesh.
///
/// The struct is `Pod`, so a batch of vertices can be handed to a GPU upload or
/// a file writer as raw bytes without conversion.
///
/// # Memory Layout
/// - Position: 3x i32 (12 bytes)
/// - Material: u32 (4 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Side: u32 (4 bytes)
///
/// Total size: 28 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// X coordinate in world space
    pub x: i32,
    /// Y coordinate in world space
    pub y: i32,
    /// Z coordinate in world space
    pub z: i32,
    /// Material of the unit this vertex belongs to
    pub material: u32,
    /// UV texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// [`BlockSide`] of the face, as its discriminant
    pub side: u32,
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - World-space corner position
    /// * `material` - Material of the owning unit
    /// * `u`, `v` - Texture coordinates of the corner
    /// * `side` - Face the corner belongs to
    pub fn new(pos: Point3<i32>, material: u32, u: f32, v: f32, side: BlockSide) -> Self {
        Vertex {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            material,
            tex_coords: [u, v],
            side: side as u32,
        }
    }

    /// Position of the vertex.
    pub fn position(&self) -> Point3<i32> {
        Point3::new(self.x, self.y, self.z)
    }
}
