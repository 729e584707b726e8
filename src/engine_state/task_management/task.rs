//! # Task System Core Traits
//!
//! This module defines the building blocks of the cooperative task system.
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. Every scheduler tick calls the task's `step()` once
//! 3. The task does a bounded amount of work and returns `TaskStep::Yield`
//!    until it is finished, then `TaskStep::Complete`
//! 4. Completed and failed tasks are dropped by the manager
//!
//! Everything runs on one thread. Tasks share data with the rest of the engine
//! through [`StResource`](crate::core::StResource) handles and must not hold a
//! borrow of that data across steps.

use crate::engine_state::rendering::MeshCombiner;
use crate::error::TerrainError;

/// Whether a task has more work to do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStep {
    /// The task should be stepped again on the next tick.
    Yield,
    /// The task is finished and can be dropped.
    Complete,
}

/// Engine services available to a task while it is stepped.
pub struct TaskContext<'a> {
    /// Receives chunks whose generation has completed
    pub combiner: &'a mut dyn MeshCombiner,
}

/// A resumable unit of work.
///
/// # Implementation Guidelines
/// - Keep each step short: one step runs inside one scheduler tick
/// - Keep the task's progress in the task itself, not on the call stack
pub trait Task {
    /// Advances the task by one step.
    ///
    /// # Errors
    /// A returned error is fatal for the task; the manager drops it and does
    /// not retry.
    fn step(&mut self, context: &mut TaskContext<'_>) -> Result<TaskStep, TerrainError>;

    /// Short description used in log messages.
    fn label(&self) -> String;
}
