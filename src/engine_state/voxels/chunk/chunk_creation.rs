//! # Chunk Creation Module
//!
//! This module builds the occupancy grid of a chunk from a heightfield.
//!
//! ## Storage
//!
//! The grid is a dense bit vector with one bit per cell (1 = solid, 0 = empty).
//! Cells are laid out column by column: for each `x`, for each `z`, the 256
//! vertical cells follow each other. That layout matches the x/z/y scan order of
//! the chunk builder and makes filling a column one contiguous run.
//!
//! Unlike a padded layout, the grid has no border cells; neighbour queries that
//! fall outside the chunk report "no neighbour" instead.

use bitvec::vec::BitVec;
use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::heightfield::Heightfield;

use super::{cell_index, CHUNK_HEIGHT};

/// Dense solid/empty occupancy of one chunk.
///
/// Dimensions are always `(size, CHUNK_HEIGHT, size)` for `(x, y, z)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    /// Columns along each horizontal edge.
    size: usize,
    /// One bit per cell, indexed by [`cell_index`].
    solid_array: BitVec,
}

impl OccupancyGrid {
    /// Creates a grid where every cell is empty.
    ///
    /// # Arguments
    /// * `size` - Columns along each horizontal edge of the chunk
    pub fn empty(size: usize) -> Self {
        OccupancyGrid {
            size,
            solid_array: BitVec::repeat(false, size * size * CHUNK_HEIGHT),
        }
    }

    /// Builds the grid of a chunk footprint from a heightfield.
    ///
    /// For every column `(x, z)` the heightfield is sampled at
    /// `(anchor.x + x, anchor.z + z)` and every cell with `y < min(height, 256)`
    /// is marked solid. Columns are always one solid run starting at `y = 0`:
    /// there are no caves and no overhangs.
    ///
    /// # Arguments
    /// * `anchor` - World-space anchor of the chunk
    /// * `size` - Columns along each horizontal edge of the chunk
    /// * `heightfield` - Surface height source
    pub fn build<H: Heightfield + ?Sized>(anchor: Point3<i32>, size: usize, heightfield: &H) -> Self {
        let mut grid = Self::empty(size);

        for x in 0..size {
            for z in 0..size {
                let height = heightfield.height(anchor.x + x as i32, anchor.z + z as i32);
                let top = (height as usize).min(CHUNK_HEIGHT);
                let column_start = cell_index(size, x, 0, z);
                for y in 0..top {
                    grid.solid_array.set(column_start + y, true);
                }
            }
        }

        grid
    }

    /// Columns along each horizontal edge.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Grid dimensions as `(x, y, z)`.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.size, CHUNK_HEIGHT, self.size)
    }

    /// Returns `true` if the coordinate lies inside the grid.
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.size && y < CHUNK_HEIGHT && z < self.size
    }

    /// Checks if the cell at the given coordinates is solid.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds. Callers guard every lookup,
    /// so reaching this is a bug.
    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        assert!(
            self.contains(x, y, z),
            "cell ({x}, {y}, {z}) is outside a chunk grid of size {}",
            self.size
        );
        self.solid_array[cell_index(self.size, x, y, z)]
    }

    /// Marks a cell solid or empty.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn set_solid(&mut self, x: usize, y: usize, z: usize, solid: bool) {
        assert!(
            self.contains(x, y, z),
            "cell ({x}, {y}, {z}) is outside a chunk grid of size {}",
            self.size
        );
        self.solid_array.set(cell_index(self.size, x, y, z), solid);
    }

    /// Looks up the neighbour of a cell across one of its faces.
    ///
    /// # Returns
    /// - `Some(solid)` if the neighbour lies inside this chunk
    /// - `None` if it falls outside the chunk (horizontal edge, below `y = 0` or
    ///   above `y = 255`). Neighbouring chunks are never consulted.
    pub fn neighbor(&self, x: usize, y: usize, z: usize, side: BlockSide) -> Option<bool> {
        let offset = side.offset();
        let nx = x.checked_add_signed(offset.x as isize)?;
        let ny = y.checked_add_signed(offset.y as isize)?;
        let nz = z.checked_add_signed(offset.z as isize)?;
        if !self.contains(nx, ny, nz) {
            return None;
        }
        Some(self.solid_array[cell_index(self.size, nx, ny, nz)])
    }

    /// Total number of solid cells.
    pub fn solid_count(&self) -> usize {
        self.solid_array.count_ones()
    }

    /// Solid cells of one column, as a list of `y` indices in ascending order.
    pub fn solid_heights(&self, x: usize, z: usize) -> Vec<usize> {
        (0..CHUNK_HEIGHT).filter(|y| self.is_solid(x, *y, z)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_fixed_dimensions() {
        let grid = OccupancyGrid::empty(16);
        assert_eq!(grid.dimensions(), (16, 256, 16));
        assert_eq!(grid.solid_count(), 0);
    }

    #[test]
    fn columns_are_contiguous_from_the_floor() {
        let heightfield = |x: i32, z: i32| ((x * 7 + z * 3).rem_euclid(40)) as u32;
        let anchor = Point3::new(32, 0, -16);
        let grid = OccupancyGrid::build(anchor, 8, &heightfield);

        for x in 0..8 {
            for z in 0..8 {
                let expected = heightfield(anchor.x + x as i32, anchor.z + z as i32) as usize;
                let solid = grid.solid_heights(x, z);
                assert_eq!(solid, (0..expected).collect::<Vec<_>>(), "column ({x}, {z})");
            }
        }
    }

    #[test]
    fn heights_above_chunk_are_clamped() {
        let grid = OccupancyGrid::build(Point3::new(0, 0, 0), 2, &|_x: i32, _z: i32| 1000u32);
        assert_eq!(grid.solid_count(), 2 * 2 * CHUNK_HEIGHT);
        assert!(grid.is_solid(1, CHUNK_HEIGHT - 1, 1));
    }

    #[test]
    fn zero_height_leaves_columns_empty() {
        let grid = OccupancyGrid::build(Point3::new(0, 0, 0), 4, &|_x: i32, _z: i32| 0u32);
        assert_eq!(grid.solid_count(), 0);
    }

    #[test]
    fn same_footprint_builds_identical_grids() {
        let heightfield = |x: i32, z: i32| (x.abs() + z.abs()) as u32 % 30;
        let a = OccupancyGrid::build(Point3::new(-16, 0, 16), 16, &heightfield);
        let b = OccupancyGrid::build(Point3::new(-16, 0, 16), 16, &heightfield);
        assert_eq!(a, b);
    }

    #[test]
    fn neighbor_reports_none_outside_the_chunk() {
        let grid = OccupancyGrid::build(Point3::new(0, 0, 0), 4, &|_x: i32, _z: i32| 256u32);

        assert_eq!(grid.neighbor(0, 5, 2, BlockSide::BACK), None);
        assert_eq!(grid.neighbor(3, 5, 2, BlockSide::FRONT), None);
        assert_eq!(grid.neighbor(2, 5, 0, BlockSide::LEFT), None);
        assert_eq!(grid.neighbor(2, 5, 3, BlockSide::RIGHT), None);
        assert_eq!(grid.neighbor(2, 0, 2, BlockSide::BOTTOM), None);
        assert_eq!(grid.neighbor(2, 255, 2, BlockSide::TOP), None);
        assert_eq!(grid.neighbor(2, 5, 2, BlockSide::TOP), Some(true));
    }

    #[test]
    fn neighbor_reads_the_correct_axis() {
        let mut grid = OccupancyGrid::empty(4);
        grid.set_solid(2, 1, 1, true);
        grid.set_solid(1, 2, 1, true);
        grid.set_solid(1, 1, 2, true);

        assert_eq!(grid.neighbor(1, 1, 1, BlockSide::FRONT), Some(true));
        assert_eq!(grid.neighbor(1, 1, 1, BlockSide::TOP), Some(true));
        assert_eq!(grid.neighbor(1, 1, 1, BlockSide::RIGHT), Some(true));
        assert_eq!(grid.neighbor(1, 1, 1, BlockSide::BACK), Some(false));
        assert_eq!(grid.neighbor(1, 1, 1, BlockSide::BOTTOM), Some(false));
        assert_eq!(grid.neighbor(1, 1, 1, BlockSide::LEFT), Some(false));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_lookup_panics() {
        let grid = OccupancyGrid::empty(4);
        grid.is_solid(4, 0, 0);
    }
}
