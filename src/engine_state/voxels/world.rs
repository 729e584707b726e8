//! # World Module
//!
//! This module provides the `World` struct which manages the loaded chunks of the
//! terrain. It serves as the central registry for chunk loading, unloading and
//! access.
//!
//! ## Architecture
//!
//! The world is sparse: only chunks that have been explicitly loaded are kept.
//! Chunks are addressed by their chunk position on the horizontal grid; a
//! chunk's world-space anchor is its position multiplied by the chunk size.
//! Chunks span the full vertical extent, so there is no vertical chunk index.
//!
//! Chunk lookup is O(1) through a hash map. Iteration in scan order sorts the
//! positions so that scheduling is deterministic.

use std::collections::HashMap;

use cgmath::{Point2, Point3};
use log::{info, warn};

use crate::core::StResource;
use crate::engine_state::voxels::chunk::Chunk;
use crate::error::TerrainError;

/// The set of loaded chunks.
///
/// # Examples
///
/// ```
/// use cgmath::{Point2, Point3};
/// use voxel_terrain::engine_state::voxels::world::World;
///
/// let mut world = World::new(16);
/// world.add_chunk_at(Point2::new(1, -2)).unwrap();
///
/// let chunk = world.get_chunk_at(Point2::new(1, -2)).unwrap();
/// assert_eq!(chunk.get().anchor(), Point3::new(16, 0, -32));
/// ```
pub struct World {
    /// Columns along each horizontal edge of every chunk.
    chunk_size: usize,
    /// A mapping from chunk position to chunk data.
    chunks: HashMap<Point2<i32>, StResource<Chunk>>,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `chunk_size` - Columns along each horizontal edge of every chunk
    pub fn new(chunk_size: usize) -> Self {
        World {
            chunk_size,
            chunks: HashMap::new(),
        }
    }

    /// Columns along each horizontal edge of every chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// World-space anchor of the chunk at a chunk position.
    ///
    /// # Returns
    /// `None` if the anchor, or the far edge of the chunk, does not fit in
    /// `i32` world coordinates.
    pub fn anchor_for(&self, chunk_position: Point2<i32>) -> Option<Point3<i32>> {
        let size = i32::try_from(self.chunk_size).ok()?;
        let x = chunk_position.x.checked_mul(size)?;
        let z = chunk_position.y.checked_mul(size)?;
        x.checked_add(size)?;
        z.checked_add(size)?;
        Some(Point3::new(x, 0, z))
    }

    /// Loads a chunk at the specified chunk position if one isn't loaded already.
    ///
    /// The new chunk is empty and marked as needing an update, so the next
    /// scheduler tick starts generating it.
    ///
    /// # Returns
    /// The chunk at the position, either the newly created one or the one that
    /// was already loaded.
    ///
    /// # Errors
    /// [`TerrainError::ChunkOutOfRange`] if the chunk would extend past the
    /// `i32` world coordinate range.
    pub fn add_chunk_at(
        &mut self,
        chunk_position: Point2<i32>,
    ) -> Result<StResource<Chunk>, TerrainError> {
        let anchor = self
            .anchor_for(chunk_position)
            .ok_or(TerrainError::ChunkOutOfRange {
                position: chunk_position,
                chunk_size: self.chunk_size,
            })?;
        let chunk_size = self.chunk_size;
        Ok(self
            .chunks
            .entry(chunk_position)
            .or_insert_with(|| StResource::new(Chunk::new(anchor, chunk_size)))
            .clone())
    }

    /// Retrieves the chunk at the specified chunk position.
    ///
    /// # Returns
    /// A handle to the chunk if it is loaded, or `None` if not.
    pub fn get_chunk_at(&self, chunk_position: Point2<i32>) -> Option<StResource<Chunk>> {
        self.chunks.get(&chunk_position).cloned()
    }

    /// Unloads the chunk at the specified chunk position, destroying every unit
    /// it owns.
    ///
    /// The chunk is marked as unloaded, so a generation task still holding it
    /// stops on its next step without recreating units or consolidating.
    ///
    /// # Returns
    /// The number of units destroyed, or `None` if no chunk was loaded there.
    pub fn remove_chunk_at(&mut self, chunk_position: Point2<i32>) -> Option<usize> {
        let handle = self.chunks.remove(&chunk_position)?;
        let mut chunk = handle.get_mut();
        if chunk.is_generation_in_flight() {
            warn!(
                "Unloading chunk at {:?} while its generation is in flight",
                chunk.anchor()
            );
        }
        let destroyed = chunk.unload();
        info!(
            "Unloaded chunk at {:?}, destroyed {} units",
            chunk.anchor(),
            destroyed
        );
        Some(destroyed)
    }

    /// Sets the `needs_update` flag of a loaded chunk.
    ///
    /// # Returns
    /// `true` if a chunk is loaded at the position.
    pub fn mark_dirty(&self, chunk_position: Point2<i32>) -> bool {
        match self.chunks.get(&chunk_position) {
            Some(chunk) => {
                chunk.get_mut().request_update();
                true
            }
            None => false,
        }
    }

    /// Positions of every loaded chunk, sorted by `(x, y)`.
    pub fn chunk_positions_sorted(&self) -> Vec<Point2<i32>> {
        let mut positions: Vec<Point2<i32>> = self.chunks.keys().copied().collect();
        positions.sort_by_key(|position| (position.x, position.y));
        positions
    }

    /// Every loaded chunk in deterministic scan order.
    pub fn chunks_in_scan_order(&self) -> Vec<(Point2<i32>, StResource<Chunk>)> {
        self.chunk_positions_sorted()
            .into_iter()
            .filter_map(|position| Some((position, self.get_chunk_at(position)?)))
            .collect()
    }

    /// Returns `true` if any loaded chunk has an unconsumed update request.
    pub fn has_pending_updates(&self) -> bool {
        self.chunks.values().any(|chunk| chunk.get().needs_update())
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if no chunk is loaded.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
