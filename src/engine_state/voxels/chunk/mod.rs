//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one fixed-size column block of the
//! terrain, together with its occupancy grid, its renderable units and the
//! lifecycle flags the scheduler drives it by.
//!
//! ## Storage
//!
//! A chunk is `size × CHUNK_HEIGHT × size` cells. Both per-cell stores use the
//! same dense layout, addressed by [`cell_index`]:
//! - the [`OccupancyGrid`](chunk_creation::OccupancyGrid) holds one bit per cell
//! - the [`UnitMap`] holds an optional [`RenderableUnit`] per cell
//!
//! ## Lifecycle
//!
//! A chunk starts dirty (`needs_update == true`) and uninitialised. The first
//! generation pass populates the grid and creates units; later passes only hand
//! the existing units to the mesh combiner again. The terrain of a chunk never
//! changes after its first build.

use cgmath::Point3;

use super::block::RenderableUnit;

pub mod chunk_builder;
pub mod chunk_creation;
pub mod chunk_iteration;

/// Vertical extent of every chunk, in cells.
pub const CHUNK_HEIGHT: usize = 256;

/// Flat index of a chunk-local cell.
///
/// Cells are stored column by column: `x` outermost, then `z`, with the
/// `CHUNK_HEIGHT` cells of a column contiguous.
pub(crate) fn cell_index(size: usize, x: usize, y: usize, z: usize) -> usize {
    (x * size + z) * CHUNK_HEIGHT + y
}

/// Counters collected while a chunk is built and consolidated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkBuildStats {
    /// Solid cells in the occupancy grid.
    pub solid_cells: usize,
    /// Units created by the last grid walk.
    pub rendered_units: usize,
    /// Solid cells skipped because all six neighbours are solid.
    pub enclosed_cells: usize,
    /// Faces hidden because a solid neighbour covers them.
    pub hidden_faces: usize,
    /// Units that replaced one already recorded at the same cell.
    pub replaced_units: usize,
    /// Times the chunk's units were handed to the mesh combiner.
    pub consolidations: usize,
}

/// Dense map from chunk-local cell to the unit rendered there.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitMap {
    size: usize,
    units: Vec<Option<RenderableUnit>>,
    len: usize,
}

impl UnitMap {
    /// Creates an empty map for a chunk of the given horizontal size.
    pub fn new(size: usize) -> Self {
        UnitMap {
            size,
            units: vec![None; size * size * CHUNK_HEIGHT],
            len: 0,
        }
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < self.size && y < CHUNK_HEIGHT && z < self.size,
            "cell ({x}, {y}, {z}) is outside a unit map of size {}",
            self.size
        );
        cell_index(self.size, x, y, z)
    }

    /// The unit at a cell, if one is recorded.
    ///
    /// # Panics
    /// Panics if the cell is outside the chunk.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&RenderableUnit> {
        self.units[self.index(x, y, z)].as_ref()
    }

    /// Records a unit at a cell.
    ///
    /// # Returns
    /// The unit previously recorded there, which the caller then drops.
    ///
    /// # Panics
    /// Panics if the cell is outside the chunk.
    pub fn replace(&mut self, cell: Point3<usize>, unit: RenderableUnit) -> Option<RenderableUnit> {
        let index = self.index(cell.x, cell.y, cell.z);
        let previous = self.units[index].replace(unit);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Iterates over recorded units in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderableUnit> + '_ {
        self.units.iter().flatten()
    }

    /// Number of recorded units.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no unit is recorded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Destroys every unit and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let destroyed = self.len;
        self.units.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
        destroyed
    }
}

/// Read-only view of a chunk handed to the mesh combiner.
#[derive(Debug, Clone, Copy)]
pub struct ChunkRoot<'a> {
    /// World-space anchor of the chunk.
    pub anchor: Point3<i32>,
    /// Every unit the chunk currently renders.
    pub units: &'a UnitMap,
}

/// A `size × 256 × size` block of terrain.
///
/// Chunks are plain data; a [`ChunkBuilder`](chunk_builder::ChunkBuilder) fills
/// them in over several scheduler ticks.
#[derive(Debug)]
pub struct Chunk {
    /// World-space position of the chunk's minimum corner. `x` and `z` are
    /// multiples of `size`, `y` is always 0.
    anchor: Point3<i32>,
    size: usize,
    grid: Option<chunk_creation::OccupancyGrid>,
    units: UnitMap,
    needs_update: bool,
    initialized: bool,
    generation_in_flight: bool,
    unloaded: bool,
    stats: ChunkBuildStats,
}

impl Chunk {
    /// Creates an unbuilt chunk that is already marked as needing an update.
    ///
    /// # Arguments
    /// * `anchor` - World-space anchor of the chunk
    /// * `size` - Columns along each horizontal edge
    pub fn new(anchor: Point3<i32>, size: usize) -> Self {
        Chunk {
            anchor,
            size,
            grid: None,
            units: UnitMap::new(size),
            needs_update: true,
            initialized: false,
            generation_in_flight: false,
            unloaded: false,
            stats: ChunkBuildStats::default(),
        }
    }

    /// World-space anchor of the chunk.
    pub fn anchor(&self) -> Point3<i32> {
        self.anchor
    }

    /// Columns along each horizontal edge.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The occupancy grid, once the first build has populated it.
    pub fn grid(&self) -> Option<&chunk_creation::OccupancyGrid> {
        self.grid.as_ref()
    }

    /// Units currently rendered by the chunk.
    pub fn units(&self) -> &UnitMap {
        &self.units
    }

    /// Counters from the chunk's builds.
    pub fn stats(&self) -> &ChunkBuildStats {
        &self.stats
    }

    /// Whether a regeneration has been requested and not yet scheduled.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Requests a regeneration. Safe to call at any time, including while a
    /// generation is in flight; the request is then picked up by a later tick.
    pub fn request_update(&mut self) {
        self.needs_update = true;
    }

    /// Clears the update request and reports whether one was pending.
    pub fn take_update_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_update)
    }

    /// Whether the occupancy grid has been populated.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a generation task currently holds this chunk.
    pub fn is_generation_in_flight(&self) -> bool {
        self.generation_in_flight
    }

    pub(crate) fn set_generation_in_flight(&mut self, in_flight: bool) {
        self.generation_in_flight = in_flight;
    }

    /// View of the chunk for the mesh combiner.
    pub fn root(&self) -> ChunkRoot<'_> {
        ChunkRoot {
            anchor: self.anchor,
            units: &self.units,
        }
    }

    /// Destroys every unit owned by the chunk.
    ///
    /// # Returns
    /// The number of units destroyed.
    pub fn destroy(&mut self) -> usize {
        self.units.clear()
    }

    /// Whether the chunk has been removed from its world.
    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    /// Marks the chunk as removed from its world and destroys its units.
    ///
    /// A builder holding an unloaded chunk stops without creating units or
    /// consolidating.
    ///
    /// # Returns
    /// The number of units destroyed.
    pub(crate) fn unload(&mut self) -> usize {
        self.unloaded = true;
        self.needs_update = false;
        self.destroy()
    }

    /// Mutable access to the pieces a builder pass works on, borrowed
    /// separately so the grid can be read while units are written.
    pub(crate) fn build_parts(&mut self) -> ChunkBuildParts<'_> {
        ChunkBuildParts {
            anchor: self.anchor,
            size: self.size,
            grid: &mut self.grid,
            units: &mut self.units,
            initialized: &mut self.initialized,
            stats: &mut self.stats,
        }
    }
}

/// Split borrow of a chunk used by the builder.
pub(crate) struct ChunkBuildParts<'a> {
    pub anchor: Point3<i32>,
    pub size: usize,
    pub grid: &'a mut Option<chunk_creation::OccupancyGrid>,
    pub units: &'a mut UnitMap,
    pub initialized: &'a mut bool,
    pub stats: &'a mut ChunkBuildStats,
}
