//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask`, which drives a
//! [`ChunkBuilder`] over a shared chunk one step per scheduler tick. It is
//! scheduled whenever the scheduler consumes a chunk's `needs_update` flag.

use log::debug;

use crate::{
    core::StResource,
    engine_state::{
        task_management::task::{Task, TaskContext, TaskStep},
        voxels::chunk::{
            chunk_builder::{BuildProgress, ChunkBuilder},
            Chunk,
        },
    },
    error::TerrainError,
};

/// A task that runs one generation pass over a chunk.
///
/// While the task exists the chunk is marked as having a generation in flight,
/// which keeps the scheduler from starting a second pass over it. The mark is
/// cleared when the task is dropped, whether it completed or failed.
pub struct ChunkGenerationTask {
    /// The chunk being generated, shared with the world
    chunk: StResource<Chunk>,
    /// Progress of the pass
    builder: ChunkBuilder,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task and marks the chunk as in flight.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to generate
    /// * `builder` - A builder that has not been stepped yet
    pub fn new(chunk: StResource<Chunk>, builder: ChunkBuilder) -> Self {
        chunk.get_mut().set_generation_in_flight(true);
        ChunkGenerationTask { chunk, builder }
    }
}

impl Task for ChunkGenerationTask {
    fn step(&mut self, context: &mut TaskContext<'_>) -> Result<TaskStep, TerrainError> {
        let mut chunk = self.chunk.get_mut();
        match self.builder.step(&mut chunk, &mut *context.combiner)? {
            BuildProgress::Yielded => Ok(TaskStep::Yield),
            BuildProgress::Completed | BuildProgress::Abandoned => Ok(TaskStep::Complete),
        }
    }

    fn label(&self) -> String {
        format!("chunk generation at {:?}", self.chunk.get().anchor())
    }
}

impl Drop for ChunkGenerationTask {
    fn drop(&mut self) {
        let mut chunk = self.chunk.get_mut();
        chunk.set_generation_in_flight(false);
        debug!("Generation of chunk at {:?} released", chunk.anchor());
    }
}
