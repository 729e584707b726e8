//! # Task Management System
//!
//! This module provides a single-threaded cooperative scheduler for resumable
//! work such as chunk generation.
//!
//! ## Architecture Overview
//!
//! - `TaskManager`: owns the in-flight tasks and steps them
//! - `Task`: a unit of work that can be suspended between steps
//! - `TaskContext`: engine services lent to a task for the duration of a step
//!
//! ## Scheduling
//!
//! Each call to [`TaskManager::process_tasks`] is one tick. A tick steps every
//! in-flight task exactly once, in the order the tasks were published. There is
//! no prioritisation, no timeout and no cancellation: a task runs until it
//! completes or fails.
//!
//! ## Example Usage
//! ```
//! use voxel_terrain::engine_state::rendering::meshing::QuadMeshCombiner;
//! use voxel_terrain::engine_state::task_management::{task::TaskContext, TaskManager};
//!
//! let mut task_manager = TaskManager::new();
//! let mut combiner = QuadMeshCombiner::new();
//!
//! // In the main loop:
//! let mut context = TaskContext { combiner: &mut combiner };
//! task_manager.process_tasks(&mut context).unwrap();
//! assert!(task_manager.is_idle());
//! ```

pub mod task;

use std::collections::VecDeque;

use log::{debug, error};
use task::{Task, TaskContext, TaskStep};

use crate::error::TerrainError;

/// Owns and steps the in-flight tasks.
#[derive(Default)]
pub struct TaskManager {
    tasks: VecDeque<Box<dyn Task>>,
    completed: usize,
    failed: usize,
}

impl TaskManager {
    /// Creates a manager with no tasks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new task. It is first stepped on the next call to
    /// [`process_tasks`](Self::process_tasks).
    pub fn publish_task(&mut self, task: Box<dyn Task>) {
        debug!("Published task: {}", task.label());
        self.tasks.push_back(task);
    }

    /// Runs one scheduler tick.
    ///
    /// Every in-flight task is stepped once. Tasks that complete are dropped.
    /// Tasks that fail are logged and dropped; the remaining tasks are still
    /// stepped.
    ///
    /// # Returns
    /// - `Ok(n)` with the number of tasks that completed during this tick
    /// - `Err(e)` with the first error raised during this tick
    pub fn process_tasks(&mut self, context: &mut TaskContext<'_>) -> Result<usize, TerrainError> {
        let mut first_error = None;
        let mut completed = 0;

        for _ in 0..self.tasks.len() {
            let Some(mut task) = self.tasks.pop_front() else {
                break;
            };
            match task.step(context) {
                Ok(TaskStep::Yield) => self.tasks.push_back(task),
                Ok(TaskStep::Complete) => {
                    debug!("Task completed: {}", task.label());
                    completed += 1;
                }
                Err(err) => {
                    error!("Task failed: {}: {}", task.label(), err);
                    self.failed += 1;
                    first_error.get_or_insert(err);
                }
            }
        }

        self.completed += completed;
        match first_error {
            Some(err) => Err(err),
            None => Ok(completed),
        }
    }

    /// Number of tasks that still have work to do.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if no task is in flight.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Total number of tasks that have completed.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Total number of tasks dropped after an error.
    pub fn failed(&self) -> usize {
        self.failed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use cgmath::Point3;

    use super::*;
    use crate::engine_state::rendering::MeshCombiner;
    use crate::engine_state::voxels::chunk::ChunkRoot;

    struct NullCombiner;

    impl MeshCombiner for NullCombiner {
        fn combine_mesh_with_materials(&mut self, _root: ChunkRoot<'_>) {}
    }

    struct CountdownTask {
        name: &'static str,
        remaining: usize,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Task for CountdownTask {
        fn step(&mut self, _context: &mut TaskContext<'_>) -> Result<TaskStep, TerrainError> {
            self.log.borrow_mut().push(self.name);
            self.remaining -= 1;
            Ok(if self.remaining == 0 {
                TaskStep::Complete
            } else {
                TaskStep::Yield
            })
        }

        fn label(&self) -> String {
            self.name.to_string()
        }
    }

    struct FailingTask;

    impl Task for FailingTask {
        fn step(&mut self, _context: &mut TaskContext<'_>) -> Result<TaskStep, TerrainError> {
            Err(TerrainError::MissingTemplate {
                anchor: Point3::new(0, 0, 0),
            })
        }

        fn label(&self) -> String {
            "failing".to_string()
        }
    }

    fn countdown(
        name: &'static str,
        remaining: usize,
        log: &Rc<RefCell<Vec<&'static str>>>,
    ) -> Box<dyn Task> {
        Box::new(CountdownTask {
            name,
            remaining,
            log: Rc::clone(log),
        })
    }

    #[test]
    fn every_task_is_stepped_once_per_tick_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = TaskManager::new();
        manager.publish_task(countdown("a", 2, &log));
        manager.publish_task(countdown("b", 1, &log));
        manager.publish_task(countdown("c", 3, &log));

        let mut combiner = NullCombiner;
        let mut context = TaskContext {
            combiner: &mut combiner,
        };

        assert_eq!(manager.process_tasks(&mut context).ok(), Some(1));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(manager.in_flight(), 2);

        assert_eq!(manager.process_tasks(&mut context).ok(), Some(1));
        assert_eq!(manager.process_tasks(&mut context).ok(), Some(1));
        assert!(manager.is_idle());
        assert_eq!(*log.borrow(), vec!["a", "b", "c", "a", "c", "c"]);
        assert_eq!(manager.completed(), 3);
    }

    #[test]
    fn failed_task_is_dropped_and_others_still_run() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = TaskManager::new();
        manager.publish_task(Box::new(FailingTask));
        manager.publish_task(countdown("after", 1, &log));

        let mut combiner = NullCombiner;
        let mut context = TaskContext {
            combiner: &mut combiner,
        };

        let result = manager.process_tasks(&mut context);
        assert!(matches!(result, Err(TerrainError::MissingTemplate { .. })));
        assert_eq!(*log.borrow(), vec!["after"]);
        assert!(manager.is_idle());
        assert_eq!(manager.failed(), 1);
    }

    #[test]
    fn idle_tick_does_nothing() {
        let mut manager = TaskManager::new();
        let mut combiner = NullCombiner;
        let mut context = TaskContext {
            combiner: &mut combiner,
        };
        assert_eq!(manager.process_tasks(&mut context).ok(), Some(0));
    }
}
