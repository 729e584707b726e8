//! # Error Module
//!
//! Error types for world configuration and chunk generation.
//!
//! Configuration problems are reported as [`ConfigError`] before any chunk data
//! is allocated. Everything that can stop a generation pass is folded into
//! [`TerrainError`], which the scheduler surfaces from
//! [`TerrainEngine::process_tasks`](crate::TerrainEngine::process_tasks).

use std::path::PathBuf;

use cgmath::{Point2, Point3};

/// Errors raised while loading or validating a [`WorldConfig`](crate::WorldConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The noise frequency is zero, negative, too small to divide by, or not finite.
    #[error("noise frequency must be a finite value >= {min}, got {value}")]
    InvalidFrequency {
        /// The rejected frequency
        value: f64,
        /// The smallest accepted frequency
        min: f64,
    },

    /// The noise amplitude is negative or not finite.
    #[error("noise amplitude must be finite and non-negative, got {0}")]
    InvalidAmplitude(f64),

    /// The horizontal chunk size is zero.
    #[error("chunk size must be at least 1 column")]
    InvalidChunkSize,

    /// The horizontal chunk size is larger than the supported maximum.
    #[error("chunk size must be at most {max} columns, got {size}")]
    ChunkSizeTooLarge {
        /// The rejected size
        size: usize,
        /// The largest accepted size
        max: usize,
    },

    /// The voxel template names a block type that is not solid.
    #[error("voxel template `{0}` must use a solid block type")]
    NonSolidTemplate(String),

    /// Failed to read the config file from disk.
    #[error("failed to read config {path:?}: {source}")]
    ReadError {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] serde_json::Error),
}

/// Fatal errors of a chunk generation pass.
///
/// None of these are retried: the affected chunk simply stays un-initialized.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// The world configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No voxel template was configured, so no renderable unit can be instantiated.
    #[error("no voxel template configured for chunk at {anchor:?}")]
    MissingTemplate {
        /// Anchor of the chunk whose build was refused
        anchor: Point3<i32>,
    },

    /// The chunk position lies outside the `i32` world coordinate range.
    #[error("chunk position {position:?} with size {chunk_size} is outside the world coordinate range")]
    ChunkOutOfRange {
        /// The refused chunk position
        position: Point2<i32>,
        /// Columns along each horizontal edge of a chunk
        chunk_size: usize,
    },

    /// A chunk reached its cell scan without an occupancy grid.
    #[error("chunk at {anchor:?} has no occupancy grid during its cell scan")]
    GridMissing {
        /// Anchor of the broken chunk
        anchor: Point3<i32>,
    },
}
