//! # Chunk Iteration Module
//!
//! Iteration over the solid cells of one x-slice of an occupancy grid.
//!
//! The chunk builder processes a chunk one x-slice at a time and yields to the
//! scheduler between slices. Within a slice, cells are visited with `z` as the
//! outer and `y` as the inner loop, which is also the storage order of the grid.

use cgmath::Point3;

use super::{chunk_creation::OccupancyGrid, CHUNK_HEIGHT};

/// An iterator over the solid cells of a single x-slice.
///
/// Empty cells are skipped; every solid cell of the slice is produced exactly
/// once, as a chunk-local `(x, y, z)` coordinate.
pub struct SliceCellIterator<'a> {
    /// Grid being iterated over
    grid: &'a OccupancyGrid,
    /// The fixed x coordinate of the slice
    local_x: usize,
    /// Next y coordinate to inspect
    local_y: usize,
    /// Current z coordinate
    local_z: usize,
}

impl<'a> SliceCellIterator<'a> {
    /// Creates an iterator over slice `x` of the grid.
    ///
    /// # Panics
    /// Panics if `x` is not smaller than the grid size.
    pub fn new(grid: &'a OccupancyGrid, x: usize) -> Self {
        assert!(
            x < grid.size(),
            "slice {x} is outside a chunk grid of size {}",
            grid.size()
        );
        SliceCellIterator {
            grid,
            local_x: x,
            local_y: 0,
            local_z: 0,
        }
    }
}

impl Iterator for SliceCellIterator<'_> {
    type Item = Point3<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.local_z < self.grid.size() {
            while self.local_y < CHUNK_HEIGHT {
                let y = self.local_y;
                self.local_y += 1;
                if self.grid.is_solid(self.local_x, y, self.local_z) {
                    return Some(Point3::new(self.local_x, y, self.local_z));
                }
            }
            self.local_y = 0;
            self.local_z += 1;
        }
        None
    }
}
