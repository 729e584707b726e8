//! # Heightfield Module
//!
//! Per-column terrain surface heights derived from 2D Perlin noise.
//!
//! The height of a column is a pure function of its world position and the
//! world's [`NoiseParams`], so regenerating a chunk always reproduces the same
//! surface.

use noise::{NoiseFn, Perlin};

use crate::config::NoiseParams;
use crate::error::ConfigError;

/// Offset added to both noise coordinates, keeping samples far from the origin
/// where the noise is symmetric around the axes.
pub const NOISE_COORDINATE_OFFSET: f64 = 1_000_000.0;

/// Height added to every column, giving the terrain a minimum thickness.
pub const BASE_HEIGHT_OFFSET: f64 = 10.0;

/// Source of per-column surface heights.
///
/// Implemented by [`NoiseHeightfield`] and by any `Fn(i32, i32) -> u32`, which
/// makes flat or hand-shaped terrain easy to plug into a chunk build.
pub trait Heightfield {
    /// Height of the terrain surface at a world column. Cells below this height
    /// are solid.
    fn height(&self, world_x: i32, world_z: i32) -> u32;
}

impl<F> Heightfield for F
where
    F: Fn(i32, i32) -> u32,
{
    fn height(&self, world_x: i32, world_z: i32) -> u32 {
        self(world_x, world_z)
    }
}

/// Heightfield sampled from Perlin noise.
///
/// `height = floor(noise01((K + x) / frequency, (seed + K + z) / frequency) * amplitude + 10)`
/// where `noise01` is Perlin noise remapped to `[0, 1]` and `K` is
/// [`NOISE_COORDINATE_OFFSET`].
#[derive(Clone)]
pub struct NoiseHeightfield {
    perlin: Perlin,
    params: NoiseParams,
}

impl NoiseHeightfield {
    /// Creates a heightfield for the given parameters.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the parameters fail [`NoiseParams::validate`].
    pub fn new(params: NoiseParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            perlin: Perlin::new(0),
            params,
        })
    }

    /// The parameters this heightfield samples with.
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Samples the noise and remaps it from `[-1, 1]` to `[0, 1]`.
    fn sample_unit(&self, x: f64, z: f64) -> f64 {
        ((self.perlin.get([x, z]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl Heightfield for NoiseHeightfield {
    fn height(&self, world_x: i32, world_z: i32) -> u32 {
        let frequency = self.params.frequency;
        let x = (NOISE_COORDINATE_OFFSET + world_x as f64) / frequency;
        let z = (self.params.seed as f64 + NOISE_COORDINATE_OFFSET + world_z as f64) / frequency;
        let height = self.sample_unit(x, z) * self.params.amplitude + BASE_HEIGHT_OFFSET;
        height.floor() as u32
    }
}
