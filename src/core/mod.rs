//! # Core Module
//!
//! Resource containers shared across the terrain engine.
//!
//! ## Key Components
//! - `StResource`: Single-threaded reference-counted resource with interior mutability.
//!   Chunks are handed out as `StResource<Chunk>` so the world registry and the
//!   generation task working on a chunk can both reach it.

pub mod st_resource;

pub use st_resource::StResource;
