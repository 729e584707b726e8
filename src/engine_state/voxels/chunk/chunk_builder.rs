//! # Chunk Builder Module
//!
//! The resumable generation pass of a single chunk.
//!
//! A [`ChunkBuilder`] is a continuation: it remembers which x-slice comes next
//! and does at most one slice of work per [`step`](ChunkBuilder::step), so the
//! scheduler can interleave many chunk builds on one thread.
//!
//! ## Pass outline
//!
//! 1. Validate the configuration and the voxel template.
//! 2. If the chunk is already initialised, go straight to consolidation.
//! 3. Otherwise populate the occupancy grid from the heightfield.
//! 4. Walk the grid slice by slice (x outer, z middle, y inner). Every solid cell
//!    that is not fully enclosed gets a renderable unit with its occluded faces
//!    hidden.
//! 5. Hand the chunk's units to the mesh combiner.

use std::rc::Rc;

use cgmath::Vector3;
use log::{debug, info, trace};
use web_time::Instant;

use crate::config::WorldConfig;
use crate::engine_state::rendering::MeshCombiner;
use crate::engine_state::voxels::block::{block_side::BlockSide, RenderableUnit};
use crate::engine_state::voxels::culling::{is_fully_enclosed, occluded_faces};
use crate::engine_state::voxels::heightfield::Heightfield;
use crate::error::TerrainError;

use super::chunk_creation::OccupancyGrid;
use super::chunk_iteration::SliceCellIterator;
use super::Chunk;

/// Outcome of one builder step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProgress {
    /// More work remains; call `step` again on a later tick.
    Yielded,
    /// The pass has finished and the mesh combiner has been called.
    Completed,
    /// The chunk was unloaded; the pass stopped without touching it.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Scan { next_x: usize },
    Consolidate,
    Done,
}

/// Resumable generation pass over one chunk.
pub struct ChunkBuilder {
    config: WorldConfig,
    heightfield: Rc<dyn Heightfield>,
    phase: Phase,
    started: Option<Instant>,
}

impl ChunkBuilder {
    /// Creates a builder that has not done any work yet.
    ///
    /// # Arguments
    /// * `config` - World configuration the pass validates and instantiates from
    /// * `heightfield` - Surface height source, sampled only if the chunk is unbuilt
    pub fn new(config: WorldConfig, heightfield: Rc<dyn Heightfield>) -> Self {
        ChunkBuilder {
            config,
            heightfield,
            phase: Phase::Start,
            started: None,
        }
    }

    /// The x-slice the next step will scan, if the pass is in its scan phase.
    pub fn next_slice(&self) -> Option<usize> {
        match self.phase {
            Phase::Scan { next_x } => Some(next_x),
            _ => None,
        }
    }

    /// Returns `true` once the pass has completed.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Advances the pass by one unit of work.
    ///
    /// The first step validates, populates the grid and scans slice 0. Each
    /// following step scans one more slice. The step after the last slice
    /// consolidates. A chunk that is already initialised is consolidated in the
    /// first step.
    ///
    /// # Errors
    /// * [`TerrainError::Config`] if the configuration is invalid
    /// * [`TerrainError::MissingTemplate`] if no voxel template is configured
    ///
    /// Both are reported before the grid is allocated, leaving the chunk
    /// un-initialised.
    ///
    /// A step on an unloaded chunk ends the pass with
    /// [`BuildProgress::Abandoned`].
    pub fn step(
        &mut self,
        chunk: &mut Chunk,
        combiner: &mut dyn MeshCombiner,
    ) -> Result<BuildProgress, TerrainError> {
        if chunk.is_unloaded() && self.phase != Phase::Done {
            debug!("Chunk at {:?} was unloaded, abandoning its pass", chunk.anchor());
            self.phase = Phase::Done;
            return Ok(BuildProgress::Abandoned);
        }

        match self.phase {
            Phase::Start => {
                self.started = Some(Instant::now());
                self.config.validate()?;
                if self.config.template.is_none() {
                    return Err(TerrainError::MissingTemplate {
                        anchor: chunk.anchor(),
                    });
                }

                if chunk.is_initialized() {
                    debug!(
                        "Chunk at {:?} already built, re-running consolidation only",
                        chunk.anchor()
                    );
                    return Ok(self.consolidate(chunk, combiner));
                }

                self.populate_grid(chunk);
                self.scan_slice(chunk, 0)?;
                self.advance_after_slice(chunk, 0);
                Ok(BuildProgress::Yielded)
            }
            Phase::Scan { next_x } => {
                self.scan_slice(chunk, next_x)?;
                self.advance_after_slice(chunk, next_x);
                Ok(BuildProgress::Yielded)
            }
            Phase::Consolidate => Ok(self.consolidate(chunk, combiner)),
            Phase::Done => Ok(BuildProgress::Completed),
        }
    }

    fn populate_grid(&self, chunk: &mut Chunk) {
        let parts = chunk.build_parts();
        let grid = OccupancyGrid::build(parts.anchor, parts.size, &*self.heightfield);
        parts.stats.solid_cells = grid.solid_count();
        *parts.grid = Some(grid);
        *parts.initialized = true;
        debug!(
            "Populated grid of chunk at {:?} with {} solid cells",
            parts.anchor, parts.stats.solid_cells
        );
    }

    fn advance_after_slice(&mut self, chunk: &Chunk, x: usize) {
        let next_x = x + 1;
        self.phase = if next_x < chunk.size() {
            Phase::Scan { next_x }
        } else {
            Phase::Consolidate
        };
    }

    /// Creates units for every visible solid cell of slice `x`.
    fn scan_slice(&self, chunk: &mut Chunk, x: usize) -> Result<(), TerrainError> {
        let parts = chunk.build_parts();
        let template = self
            .config
            .template
            .as_ref()
            .ok_or(TerrainError::MissingTemplate {
                anchor: parts.anchor,
            })?;
        let grid = parts.grid.as_ref().ok_or(TerrainError::GridMissing {
            anchor: parts.anchor,
        })?;

        let mut created = 0;
        for cell in SliceCellIterator::new(grid, x) {
            if is_fully_enclosed(grid, cell.x, cell.y, cell.z) {
                parts.stats.enclosed_cells += 1;
                continue;
            }

            let position =
                parts.anchor + Vector3::new(cell.x as i32, cell.y as i32, cell.z as i32);
            let mut unit = RenderableUnit::instantiate(template, position);
            let hidden = unit.hide_occluded_faces(&occluded_faces(grid, cell.x, cell.y, cell.z));
            parts.stats.hidden_faces += hidden as usize;
            trace!(
                "Unit at {:?} shows [{}]",
                position,
                unit.faces()
                    .visible_sides()
                    .map(BlockSide::name)
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            if let Some(previous) = parts.units.replace(cell, unit) {
                trace!("Replaced unit at {:?}", previous.position);
                parts.stats.replaced_units += 1;
            }
            created += 1;
        }
        parts.stats.rendered_units += created;

        debug!(
            "Chunk at {:?}: slice {}/{} produced {} units",
            parts.anchor,
            x + 1,
            parts.size,
            created
        );
        Ok(())
    }

    fn consolidate(&mut self, chunk: &mut Chunk, combiner: &mut dyn MeshCombiner) -> BuildProgress {
        combiner.combine_mesh_with_materials(chunk.root());

        let parts = chunk.build_parts();
        parts.stats.consolidations += 1;
        self.phase = Phase::Done;

        let elapsed = self.started.map(|started| started.elapsed()).unwrap_or_default();
        info!(
            "Chunk at {:?} generated in {:?}: {} units, {} enclosed, {} faces hidden, {} consolidations",
            parts.anchor,
            elapsed,
            parts.units.len(),
            parts.stats.enclosed_cells,
            parts.stats.hidden_faces,
            parts.stats.consolidations
        );
        BuildProgress::Completed
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;
    use crate::engine_state::voxels::chunk::ChunkRoot;

    #[derive(Default)]
    struct RecordingCombiner {
        calls: Vec<(Point3<i32>, usize)>,
    }

    impl MeshCombiner for RecordingCombiner {
        fn combine_mesh_with_materials(&mut self, root: ChunkRoot<'_>) {
            self.calls.push((root.anchor, root.units.len()));
        }
    }

    fn flat(height: u32) -> Rc<dyn Heightfield> {
        Rc::new(move |_x: i32, _z: i32| height)
    }

    fn config(chunk_size: usize) -> WorldConfig {
        WorldConfig {
            chunk_size,
            ..Default::default()
        }
    }

    fn run_to_completion(
        builder: &mut ChunkBuilder,
        chunk: &mut Chunk,
        combiner: &mut RecordingCombiner,
    ) -> usize {
        let mut steps = 0;
        loop {
            steps += 1;
            let progress = builder.step(chunk, combiner).expect("build step");
            if progress != BuildProgress::Yielded {
                return steps;
            }
            assert!(steps <= chunk.size() + 1, "builder did not finish");
        }
    }

    #[test]
    fn flat_chunk_creates_only_visible_units() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 4);
        let mut builder = ChunkBuilder::new(config(4), flat(3));
        let mut combiner = RecordingCombiner::default();

        let steps = run_to_completion(&mut builder, &mut chunk, &mut combiner);

        assert_eq!(steps, 5);
        assert!(chunk.is_initialized());
        assert_eq!(chunk.grid().map(OccupancyGrid::solid_count), Some(48));
        assert_eq!(chunk.units().len(), 44);
        assert_eq!(chunk.stats().enclosed_cells, 4);
        assert_eq!(chunk.stats().rendered_units, 44);
        assert_eq!(chunk.stats().replaced_units, 0);
        assert_eq!(combiner.calls, vec![(Point3::new(0, 0, 0), 44)]);

        for x in 1..3 {
            for z in 1..3 {
                assert!(chunk.units().get(x, 1, z).is_none(), "enclosed ({x}, 1, {z})");
            }
        }
    }

    #[test]
    fn units_have_occluded_faces_hidden() {
        let mut chunk = Chunk::new(Point3::new(8, 0, -4), 4);
        let mut builder = ChunkBuilder::new(config(4), flat(3));
        run_to_completion(&mut builder, &mut chunk, &mut RecordingCombiner::default());

        let corner = chunk.units().get(0, 2, 0).expect("surface corner unit");
        assert_eq!(corner.position, Point3::new(8, 2, -4));
        let visible: Vec<BlockSide> = corner.faces().visible_sides().collect();
        assert_eq!(visible, vec![BlockSide::BACK, BlockSide::TOP, BlockSide::LEFT]);

        let floor = chunk.units().get(1, 0, 1).expect("floor unit");
        let visible: Vec<BlockSide> = floor.faces().visible_sides().collect();
        assert_eq!(visible, vec![BlockSide::BOTTOM]);
    }

    #[test]
    fn each_step_scans_one_slice() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 3);
        let mut builder = ChunkBuilder::new(config(3), flat(2));
        let mut combiner = RecordingCombiner::default();

        assert_eq!(builder.step(&mut chunk, &mut combiner).ok(), Some(BuildProgress::Yielded));
        assert_eq!(builder.next_slice(), Some(1));
        assert!(chunk.is_initialized());
        assert!(chunk.units().get(0, 1, 0).is_some());
        assert!(chunk.units().get(1, 1, 0).is_none());

        assert_eq!(builder.step(&mut chunk, &mut combiner).ok(), Some(BuildProgress::Yielded));
        assert_eq!(builder.next_slice(), Some(2));
        assert!(chunk.units().get(1, 1, 0).is_some());

        assert_eq!(builder.step(&mut chunk, &mut combiner).ok(), Some(BuildProgress::Yielded));
        assert_eq!(builder.next_slice(), None);
        assert!(combiner.calls.is_empty());

        assert_eq!(builder.step(&mut chunk, &mut combiner).ok(), Some(BuildProgress::Completed));
        assert!(builder.is_done());
        assert_eq!(combiner.calls.len(), 1);
    }

    #[test]
    fn rebuilding_an_initialized_chunk_only_consolidates() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 4);
        let mut combiner = RecordingCombiner::default();
        run_to_completion(&mut ChunkBuilder::new(config(4), flat(3)), &mut chunk, &mut combiner);

        let grid = chunk.grid().cloned();
        let units = chunk.units().clone();

        // A different heightfield proves the terrain is not sampled again.
        let mut rebuild = ChunkBuilder::new(config(4), flat(7));
        let progress = rebuild.step(&mut chunk, &mut combiner).expect("rebuild step");

        assert_eq!(progress, BuildProgress::Completed);
        assert_eq!(chunk.grid().cloned(), grid);
        assert_eq!(chunk.units(), &units);
        assert_eq!(chunk.stats().consolidations, 2);
        assert_eq!(combiner.calls.len(), 2);
    }

    #[test]
    fn missing_template_fails_before_allocation() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 4);
        let config = WorldConfig {
            template: None,
            ..config(4)
        };
        let mut builder = ChunkBuilder::new(config, flat(3));
        let mut combiner = RecordingCombiner::default();

        let result = builder.step(&mut chunk, &mut combiner);

        assert!(matches!(result, Err(TerrainError::MissingTemplate { .. })));
        assert!(!chunk.is_initialized());
        assert!(chunk.grid().is_none());
        assert!(combiner.calls.is_empty());
    }

    #[test]
    fn invalid_noise_fails_before_allocation() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 4);
        let mut config = config(4);
        config.noise.frequency = 0.0;
        let mut builder = ChunkBuilder::new(config, flat(3));

        let result = builder.step(&mut chunk, &mut RecordingCombiner::default());

        assert!(matches!(result, Err(TerrainError::Config(_))));
        assert!(chunk.grid().is_none());
    }

    #[test]
    fn unloaded_chunk_is_abandoned_mid_scan() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 4);
        let mut builder = ChunkBuilder::new(config(4), flat(3));
        let mut combiner = RecordingCombiner::default();

        assert_eq!(builder.step(&mut chunk, &mut combiner).ok(), Some(BuildProgress::Yielded));
        assert_eq!(chunk.unload(), 12);

        assert_eq!(builder.step(&mut chunk, &mut combiner).ok(), Some(BuildProgress::Abandoned));
        assert!(builder.is_done());
        assert!(chunk.units().is_empty());
        assert!(combiner.calls.is_empty());
    }

    #[test]
    fn empty_terrain_still_consolidates() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 2);
        let mut combiner = RecordingCombiner::default();
        run_to_completion(&mut ChunkBuilder::new(config(2), flat(0)), &mut chunk, &mut combiner);

        assert!(chunk.is_initialized());
        assert!(chunk.units().is_empty());
        assert_eq!(combiner.calls, vec![(Point3::new(0, 0, 0), 0)]);
    }
}
