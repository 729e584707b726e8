//! # Engine State Module
//!
//! The core engine module that ties the terrain subsystems together.
//!
//! ## Key Components
//!
//! * `TerrainEngine` - The main state container and scheduler entry point
//! * `rendering` - Mesh consolidation of finished chunks
//! * `task_management` - The cooperative task scheduler
//! * `voxels` - Heightfield, chunks, culling and the world registry
//!
//! ## Scheduling
//!
//! [`TerrainEngine::process_tasks`] is one scheduler tick:
//!
//! 1. Loaded chunks are scanned in sorted order. Every chunk whose
//!    `needs_update` flag is set, and that has no generation in flight, has the
//!    flag cleared and a [`ChunkGenerationTask`] published for it.
//! 2. Every in-flight task is stepped once.
//!
//! A flag set while a chunk's generation is in flight stays set and is consumed
//! on the first tick after that generation finishes.

use std::rc::Rc;

use cgmath::Point2;
use log::{debug, info};
use rendering::MeshCombiner;
use task_management::{task::TaskContext, TaskManager};
use voxels::{
    chunk::{chunk_builder::ChunkBuilder, Chunk},
    heightfield::{Heightfield, NoiseHeightfield},
    tasks::chunk_generation_task::ChunkGenerationTask,
    world::World,
};

use crate::{
    config::WorldConfig,
    core::StResource,
    error::{ConfigError, TerrainError},
};

pub mod rendering;
pub mod task_management;
pub mod voxels;

/// The terrain engine: world configuration, loaded chunks, scheduler and mesh
/// combiner.
///
/// # Examples
///
/// ```
/// use cgmath::Point2;
/// use voxel_terrain::engine_state::rendering::meshing::QuadMeshCombiner;
/// use voxel_terrain::{TerrainEngine, WorldConfig};
///
/// let mut engine = TerrainEngine::new(WorldConfig::default(), QuadMeshCombiner::new()).unwrap();
/// engine.load_chunk(Point2::new(0, 0)).unwrap();
/// engine.run_until_idle(100).unwrap();
///
/// let chunk = engine.world().get_chunk_at(Point2::new(0, 0)).unwrap();
/// assert!(chunk.get().is_initialized());
/// ```
pub struct TerrainEngine<C: MeshCombiner> {
    /// Validated world configuration, handed to every generation pass
    config: WorldConfig,
    /// Surface height source shared by every generation pass
    heightfield: Rc<dyn Heightfield>,
    /// The loaded chunks
    world: World,
    /// In-flight generation tasks
    task_manager: TaskManager,
    /// Receives completed chunks
    combiner: C,
    /// Number of ticks run so far
    tick: u64,
}

impl<C: MeshCombiner> TerrainEngine<C> {
    /// Creates an engine whose terrain comes from a [`NoiseHeightfield`].
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the configuration is invalid. Nothing is
    /// allocated in that case.
    pub fn new(config: WorldConfig, combiner: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let heightfield = NoiseHeightfield::new(config.noise)?;
        info!(
            "Terrain engine starting: chunk size {}, amplitude {}, frequency {}, seed {}",
            config.chunk_size, config.noise.amplitude, config.noise.frequency, config.noise.seed
        );
        Self::with_heightfield(config, Rc::new(heightfield), combiner)
    }

    /// Creates an engine with a custom heightfield.
    ///
    /// The noise parameters of `config` are still validated but not sampled.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn with_heightfield(
        config: WorldConfig,
        heightfield: Rc<dyn Heightfield>,
        combiner: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(TerrainEngine {
            world: World::new(config.chunk_size),
            config,
            heightfield,
            task_manager: TaskManager::new(),
            combiner,
            tick: 0,
        })
    }

    /// Loads the chunk at a chunk position. A newly loaded chunk is dirty and
    /// starts generating on the next tick.
    ///
    /// # Errors
    /// [`TerrainError::ChunkOutOfRange`] if the chunk would extend past the
    /// `i32` world coordinate range.
    pub fn load_chunk(
        &mut self,
        chunk_position: Point2<i32>,
    ) -> Result<StResource<Chunk>, TerrainError> {
        self.world.add_chunk_at(chunk_position)
    }

    /// Unloads the chunk at a chunk position, destroys its units and releases
    /// its mesh from the combiner.
    ///
    /// A generation still in flight for the chunk is abandoned on its next step.
    ///
    /// # Returns
    /// The number of units destroyed, or `None` if no chunk was loaded there.
    pub fn unload_chunk(&mut self, chunk_position: Point2<i32>) -> Option<usize> {
        let anchor = self.world.anchor_for(chunk_position)?;
        let destroyed = self.world.remove_chunk_at(chunk_position)?;
        self.combiner.release(anchor);
        Some(destroyed)
    }

    /// Marks a loaded chunk as needing an update.
    ///
    /// # Returns
    /// `true` if a chunk is loaded at the position.
    pub fn request_update(&mut self, chunk_position: Point2<i32>) -> bool {
        self.world.mark_dirty(chunk_position)
    }

    /// Runs one scheduler tick.
    ///
    /// # Returns
    /// - `Ok(n)` with the number of generation passes that ended this tick,
    ///   including passes abandoned because their chunk was unloaded
    /// - `Err(e)` with the first fatal error of the tick; the failed chunk stays
    ///   un-initialised and is not retried unless marked dirty again
    pub fn process_tasks(&mut self) -> Result<usize, TerrainError> {
        self.tick += 1;

        for (position, chunk) in self.world.chunks_in_scan_order() {
            let scheduled = {
                let mut chunk = chunk.get_mut();
                !chunk.is_generation_in_flight() && chunk.take_update_request()
            };
            if scheduled {
                debug!("Tick {}: scheduling generation of chunk {:?}", self.tick, position);
                let builder = ChunkBuilder::new(self.config.clone(), Rc::clone(&self.heightfield));
                self.task_manager
                    .publish_task(Box::new(ChunkGenerationTask::new(chunk, builder)));
            }
        }

        let mut context = TaskContext {
            combiner: &mut self.combiner,
        };
        self.task_manager.process_tasks(&mut context)
    }

    /// Returns `true` if no generation is in flight and no chunk is dirty.
    pub fn is_idle(&self) -> bool {
        self.task_manager.is_idle() && !self.world.has_pending_updates()
    }

    /// Runs ticks until the engine is idle or `max_ticks` ticks have run.
    ///
    /// # Returns
    /// The number of ticks run by this call.
    ///
    /// # Errors
    /// Stops at, and returns, the first fatal error.
    pub fn run_until_idle(&mut self, max_ticks: u64) -> Result<u64, TerrainError> {
        let mut ticks = 0;
        while !self.is_idle() && ticks < max_ticks {
            self.process_tasks()?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// The world configuration.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The loaded chunks.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The mesh combiner.
    pub fn combiner(&self) -> &C {
        &self.combiner
    }

    /// Mutable access to the mesh combiner.
    pub fn combiner_mut(&mut self) -> &mut C {
        &mut self.combiner
    }

    /// Number of generation passes currently in flight.
    pub fn in_flight(&self) -> usize {
        self.task_manager.in_flight()
    }

    /// Number of ticks run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
