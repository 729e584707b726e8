#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedural heightmap terrain for a voxel world.
//!
//! For every chunk (a fixed square of columns, 256 cells tall) the crate:
//! 1. derives surface heights from 2D Perlin noise
//! 2. fills a dense occupancy grid below the surface
//! 3. creates a renderable unit for every solid cell that can be seen, hiding
//!    the faces covered by solid neighbours
//! 4. hands the units to a mesh combiner
//!
//! ## Key Modules
//!
//! * `config` - World configuration and its JSON loading
//! * `core` - Shared single-threaded resource handles
//! * `engine_state` - Heightfield, chunks, culling, scheduler and meshing
//! * `error` - Configuration and generation errors
//!
//! ## Architecture
//!
//! All work runs on one thread. Chunk generation is split into resumable tasks
//! that process one x-slice of a chunk per scheduler tick, so a host loop can
//! call [`TerrainEngine::process_tasks`] once per frame without stalling.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point2;
//! use voxel_terrain::engine_state::rendering::meshing::QuadMeshCombiner;
//! use voxel_terrain::{TerrainEngine, WorldConfig};
//!
//! let mut engine = TerrainEngine::new(WorldConfig::default(), QuadMeshCombiner::new())?;
//! engine.load_chunk(Point2::new(0, 0))?;
//! while !engine.is_idle() {
//!     engine.process_tasks()?;
//! }
//! # Ok::<(), voxel_terrain::TerrainError>(())
//! ```

use cgmath::Point2;
use log::info;

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;

pub use config::{NoiseParams, WorldConfig};
pub use engine_state::rendering::MeshCombiner;
pub use engine_state::TerrainEngine;
pub use error::{ConfigError, TerrainError};

use engine_state::rendering::meshing::QuadMeshCombiner;

/// Environment variable naming a JSON world configuration file.
pub const CONFIG_ENV_VAR: &str = "TERRAIN_CONFIG";

/// Environment variable that, when set, replaces the configured seed with a random one.
pub const RANDOM_SEED_ENV_VAR: &str = "TERRAIN_RANDOM_SEED";

/// Chunks generated by [`run`] along each horizontal axis.
const DEMO_CHUNKS_PER_AXIS: i32 = 2;

/// Upper bound on scheduler ticks for [`run`].
const MAX_TICKS: u64 = 10_000;

/// Generates a small block of chunks headlessly and logs the result.
///
/// Logging is configured through `RUST_LOG`. The world configuration is read
/// from the file named by [`CONFIG_ENV_VAR`] if it is set.
///
/// # Errors
/// Returns the first configuration or generation error.
pub fn run() -> Result<(), TerrainError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut config = match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    if std::env::var_os(RANDOM_SEED_ENV_VAR).is_some() {
        config.noise = config.noise.with_random_seed();
        info!("Using random seed {}", config.noise.seed);
    }

    let mut engine = TerrainEngine::new(config, QuadMeshCombiner::new())?;
    for x in 0..DEMO_CHUNKS_PER_AXIS {
        for z in 0..DEMO_CHUNKS_PER_AXIS {
            engine.load_chunk(Point2::new(x, z))?;
        }
    }

    let ticks = engine.run_until_idle(MAX_TICKS)?;
    info!("Generation finished after {ticks} ticks");

    for (position, chunk) in engine.world().chunks_in_scan_order() {
        let chunk = chunk.get();
        let stats = chunk.stats();
        let faces = engine
            .combiner()
            .mesh_at(chunk.anchor())
            .map_or(0, |mesh| mesh.face_count());
        info!(
            "Chunk {:?}: {} solid cells, {} units, {} enclosed, {} faces hidden, {} quads",
            position,
            stats.solid_cells,
            chunk.units().len(),
            stats.enclosed_cells,
            stats.hidden_faces,
            faces
        );
    }

    Ok(())
}
