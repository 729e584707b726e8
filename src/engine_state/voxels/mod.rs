//! # Voxel Terrain Core
//!
//! This module contains the voxel data side of terrain generation.
//!
//! ## Architecture
//!
//! * **Heightfield**: Per-column surface heights from coherent noise
//! * **Block**: Block types, faces, voxel templates and renderable units
//! * **Chunk**: Occupancy grid, unit map and the resumable builder
//! * **Culling**: Enclosure and face occlusion queries on a chunk's grid
//! * **World**: Registry of loaded chunks
//! * **Tasks**: Scheduler tasks that drive chunk builders
//!
//! ## Data Flow
//!
//! 1. A chunk is loaded into the world, or an existing one is marked dirty
//! 2. The scheduler consumes the flag and publishes a generation task
//! 3. The task populates the grid from the heightfield on its first pass
//! 4. The grid is walked slice by slice, creating units with culled faces
//! 5. The finished chunk is handed to the mesh combiner

pub mod block;
pub mod chunk;
pub mod culling;
pub mod heightfield;
pub mod tasks;
pub mod world;
