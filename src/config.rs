//! # Configuration Module
//!
//! World-level settings for terrain generation: horizontal chunk size, noise
//! parameters and the voxel template every renderable unit is instantiated from.
//!
//! Settings are plain serde structs with `#[serde(default)]`, so a JSON file only
//! needs to name the values it overrides. They are validated once when the
//! engine is created and again at the start of every chunk build.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::VoxelTemplate;
use crate::error::ConfigError;

/// Default number of columns along each horizontal edge of a chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 16;

/// Largest accepted number of columns along each horizontal edge of a chunk.
pub const MAX_CHUNK_SIZE: usize = 1024;

/// Smallest noise frequency accepted before the heightfield would divide by ~0.
pub const MIN_FREQUENCY: f64 = f64::EPSILON;

/// Range that [`NoiseParams::with_random_seed`] draws seeds from.
const RANDOM_SEED_RANGE: std::ops::Range<i32> = 0..1_000_000;

/// Global coherent-noise parameters shared by every chunk of a world.
///
/// These are immutable once an engine is built; generation in flight always
/// sees the values it was started with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Height contributed by the noise on top of the base offset.
    pub amplitude: f64,
    /// Horizontal stretch of the noise, in world units per noise unit.
    pub frequency: f64,
    /// World seed, applied as an offset along the z axis of the noise domain.
    pub seed: i32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            amplitude: 10.0,
            frequency: 20.0,
            seed: 0,
        }
    }
}

impl NoiseParams {
    /// Returns a copy of these parameters with a freshly drawn seed.
    pub fn with_random_seed(self) -> Self {
        Self {
            seed: fastrand::i32(RANDOM_SEED_RANGE),
            ..self
        }
    }

    /// Checks that the parameters describe a usable heightfield.
    ///
    /// # Errors
    /// * [`ConfigError::InvalidFrequency`] if `frequency` is below [`MIN_FREQUENCY`] or not finite
    /// * [`ConfigError::InvalidAmplitude`] if `amplitude` is negative or not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frequency.is_finite() || self.frequency < MIN_FREQUENCY {
            return Err(ConfigError::InvalidFrequency {
                value: self.frequency,
                min: MIN_FREQUENCY,
            });
        }
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(ConfigError::InvalidAmplitude(self.amplitude));
        }
        Ok(())
    }
}

/// Top-level terrain configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Columns along each horizontal edge of a chunk.
    pub chunk_size: usize,
    /// Heightfield noise parameters.
    pub noise: NoiseParams,
    /// Visual template for a single solid voxel. `None` is accepted here but
    /// refused when a chunk build starts.
    pub template: Option<VoxelTemplate>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            noise: NoiseParams::default(),
            template: Some(VoxelTemplate::default()),
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from JSON text.
    ///
    /// Missing fields fall back to their defaults. The result is not validated;
    /// call [`WorldConfig::validate`] or hand it to an engine.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(ConfigError::ParseError)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    /// Validates chunk size, noise parameters and, when present, the template.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize);
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkSizeTooLarge {
                size: self.chunk_size,
                max: MAX_CHUNK_SIZE,
            });
        }
        self.noise.validate()?;
        if let Some(template) = &self.template {
            if !template.block_type.is_solid() {
                return Err(ConfigError::NonSolidTemplate(template.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn default_config_is_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(config.template.is_some());
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let params = NoiseParams {
            frequency: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn negative_and_nan_frequency_are_rejected() {
        for frequency in [-1.0, f64::NAN, f64::INFINITY] {
            let params = NoiseParams {
                frequency,
                ..Default::default()
            };
            assert!(
                params.validate().is_err(),
                "frequency {frequency} should be rejected"
            );
        }
    }

    #[test]
    fn negative_amplitude_is_rejected() {
        let params = NoiseParams {
            amplitude: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidAmplitude(_))
        ));
    }

    #[test]
    fn zero_amplitude_is_accepted() {
        let params = NoiseParams {
            amplitude: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let config = WorldConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidChunkSize)));
    }

    #[test]
    fn oversized_chunk_is_rejected() {
        let config = WorldConfig {
            chunk_size: MAX_CHUNK_SIZE + 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ChunkSizeTooLarge { size, max: MAX_CHUNK_SIZE }) if size == MAX_CHUNK_SIZE + 1
        ));

        let config = WorldConfig {
            chunk_size: MAX_CHUNK_SIZE,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn air_template_is_rejected() {
        let mut config = WorldConfig::default();
        if let Some(template) = config.template.as_mut() {
            template.block_type = BlockType::AIR;
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonSolidTemplate(_))
        ));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = WorldConfig::from_json_str(r#"{ "chunk_size": 8, "noise": { "seed": 42 } }"#)
            .expect("valid json");
        assert_eq!(config.chunk_size, 8);
        assert_eq!(config.noise.seed, 42);
        assert_eq!(config.noise.frequency, NoiseParams::default().frequency);
        assert_eq!(config.template, WorldConfig::default().template);
    }

    #[test]
    fn negative_chunk_size_fails_to_parse() {
        let result = WorldConfig::from_json_str(r#"{ "chunk_size": -4 }"#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn null_template_parses_as_missing() {
        let config = WorldConfig::from_json_str(r#"{ "template": null }"#).expect("valid json");
        assert!(config.template.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn random_seed_keeps_other_parameters() {
        let params = NoiseParams {
            amplitude: 3.0,
            frequency: 7.5,
            seed: -1,
        };
        let seeded = params.with_random_seed();
        assert_eq!(seeded.amplitude, 3.0);
        assert_eq!(seeded.frequency, 7.5);
        assert!(RANDOM_SEED_RANGE.contains(&seeded.seed));
    }

    #[test]
    fn load_reads_values_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("world.json");
        std::fs::write(
            &path,
            r#"{ "chunk_size": 8, "noise": { "amplitude": 4.5, "frequency": 12.0, "seed": 77 } }"#,
        )
        .expect("write config");

        let config = WorldConfig::load(&path).expect("load config");

        assert_eq!(config.chunk_size, 8);
        assert_eq!(
            config.noise,
            NoiseParams {
                amplitude: 4.5,
                frequency: 12.0,
                seed: 77,
            }
        );
        assert_eq!(config.template, WorldConfig::default().template);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_reports_malformed_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("world.json");
        std::fs::write(&path, "{ chunk_size: ").expect("write config");

        assert!(matches!(
            WorldConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let result = WorldConfig::load("/definitely/not/here/world.json");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
