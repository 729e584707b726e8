//! # Voxel Terrain Entry Point
//!
//! Runs the library's headless `run()` demo.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! RUST_LOG=debug TERRAIN_CONFIG=world.json cargo run
//! ```

fn main() {
    if let Err(err) = voxel_terrain::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
