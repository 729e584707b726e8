//! # Culling Module
//!
//! Occlusion queries against a chunk's occupancy grid.
//!
//! Two questions are answered for a solid cell:
//!
//! 1. Is it fully enclosed? A cell whose six neighbours are all inside the chunk
//!    and solid can never be seen, so no renderable unit is created for it.
//! 2. Which of its faces are occluded? Those faces are hidden on the unit.
//!
//! Neighbours outside the chunk count as absent. Cells on a chunk edge, on the
//! floor (`y = 0`) or at the ceiling (`y = 255`) are therefore never fully
//! enclosed, and their outward faces are never occluded, even when the
//! adjacent chunk is solid there. Seams between chunks are left as they are.

use crate::engine_state::voxels::block::block_side::BlockSide;

use super::chunk::chunk_creation::OccupancyGrid;

/// Returns `true` iff all six axis neighbours of the cell are in bounds and solid.
///
/// # Panics
/// Panics if the cell itself is outside the grid.
pub fn is_fully_enclosed(grid: &OccupancyGrid, x: usize, y: usize, z: usize) -> bool {
    assert!(
        grid.contains(x, y, z),
        "cell ({x}, {y}, {z}) is outside a chunk grid of size {}",
        grid.size()
    );
    BlockSide::all()
        .into_iter()
        .all(|side| grid.neighbor(x, y, z, side) == Some(true))
}

/// Determines which faces of the cell are covered by a solid neighbour.
///
/// # Returns
/// An array of 6 booleans in [`BlockSide`] order; an entry is `true` iff the
/// neighbour across that face is inside the chunk and solid.
///
/// # Panics
/// Panics if the cell itself is outside the grid.
pub fn occluded_faces(grid: &OccupancyGrid, x: usize, y: usize, z: usize) -> [bool; 6] {
    assert!(
        grid.contains(x, y, z),
        "cell ({x}, {y}, {z}) is outside a chunk grid of size {}",
        grid.size()
    );
    let mut occluded = [false; 6];
    for side in BlockSide::all() {
        occluded[side as usize] = grid.neighbor(x, y, z, side) == Some(true);
    }
    occluded
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::engine_state::voxels::chunk::CHUNK_HEIGHT;

    fn flat_grid(size: usize, height: u32) -> OccupancyGrid {
        OccupancyGrid::build(Point3::new(0, 0, 0), size, &move |_x: i32, _z: i32| height)
    }

    fn faces(sides: &[BlockSide]) -> [bool; 6] {
        let mut flags = [false; 6];
        for side in sides {
            flags[*side as usize] = true;
        }
        flags
    }

    #[test]
    fn interior_cell_of_solid_block_is_enclosed() {
        let grid = flat_grid(4, 3);
        for x in 1..3 {
            for z in 1..3 {
                assert!(is_fully_enclosed(&grid, x, 1, z), "({x}, 1, {z})");
            }
        }
    }

    #[test]
    fn floor_and_surface_cells_are_not_enclosed() {
        let grid = flat_grid(4, 3);
        assert!(!is_fully_enclosed(&grid, 1, 0, 1));
        assert!(!is_fully_enclosed(&grid, 1, 2, 1));
    }

    #[test]
    fn boundary_cells_are_never_enclosed() {
        let size = 4;
        let grid = flat_grid(size, CHUNK_HEIGHT as u32);
        for x in 0..size {
            for z in 0..size {
                for y in [0, 1, 128, CHUNK_HEIGHT - 1] {
                    let on_edge = x == 0
                        || x == size - 1
                        || z == 0
                        || z == size - 1
                        || y == 0
                        || y == CHUNK_HEIGHT - 1;
                    assert_eq!(
                        is_fully_enclosed(&grid, x, y, z),
                        !on_edge,
                        "cell ({x}, {y}, {z})"
                    );
                }
            }
        }
    }

    #[test]
    fn single_empty_neighbour_breaks_enclosure() {
        let mut grid = flat_grid(5, 5);
        assert!(is_fully_enclosed(&grid, 2, 2, 2));
        for side in BlockSide::all() {
            let mut holed = grid.clone();
            let offset = side.offset();
            holed.set_solid(
                (2 + offset.x) as usize,
                (2 + offset.y) as usize,
                (2 + offset.z) as usize,
                false,
            );
            assert!(!is_fully_enclosed(&holed, 2, 2, 2), "hole at {side:?}");
        }
        grid.set_solid(2, 2, 2, false);
        assert!(!is_fully_enclosed(&grid, 2, 3, 2));
    }

    #[test]
    fn floor_cell_never_has_bottom_occluded() {
        let grid = flat_grid(4, 3);
        let occluded = occluded_faces(&grid, 1, 0, 1);
        assert_eq!(
            occluded,
            faces(&[
                BlockSide::FRONT,
                BlockSide::BACK,
                BlockSide::TOP,
                BlockSide::LEFT,
                BlockSide::RIGHT,
            ])
        );
    }

    #[test]
    fn surface_corner_cell_only_sees_inward_neighbours() {
        let grid = flat_grid(4, 3);
        let occluded = occluded_faces(&grid, 0, 2, 0);
        assert_eq!(
            occluded,
            faces(&[BlockSide::FRONT, BlockSide::BOTTOM, BlockSide::RIGHT])
        );
    }

    #[test]
    fn ceiling_cell_never_has_top_occluded() {
        let grid = flat_grid(3, CHUNK_HEIGHT as u32);
        let occluded = occluded_faces(&grid, 1, CHUNK_HEIGHT - 1, 1);
        assert!(!occluded[BlockSide::TOP as usize]);
        assert!(occluded[BlockSide::BOTTOM as usize]);
    }

    #[test]
    fn isolated_cell_has_nothing_occluded() {
        let mut grid = OccupancyGrid::empty(3);
        grid.set_solid(1, 7, 1, true);
        assert_eq!(occluded_faces(&grid, 1, 7, 1), [false; 6]);
        assert!(!is_fully_enclosed(&grid, 1, 7, 1));
    }

    #[test]
    fn enclosure_matches_all_faces_occluded() {
        let grid = OccupancyGrid::build(Point3::new(0, 0, 0), 6, &|x: i32, z: i32| {
            (3 + (x * 5 + z * 11) % 4) as u32
        });
        for x in 0..6 {
            for z in 0..6 {
                for y in 0..8 {
                    if !grid.is_solid(x, y, z) {
                        continue;
                    }
                    let all_occluded = occluded_faces(&grid, x, y, z).iter().all(|o| *o);
                    assert_eq!(is_fully_enclosed(&grid, x, y, z), all_occluded);
                }
            }
        }
    }
}
