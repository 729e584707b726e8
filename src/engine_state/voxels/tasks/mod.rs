//! # Voxel Task System
//!
//! Resumable tasks over voxel data, stepped by the
//! [`TaskManager`](crate::engine_state::task_management::TaskManager).

pub mod chunk_generation_task;
