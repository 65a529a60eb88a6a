//! Construction-time configuration for a terrain world.
//!
//! All knobs are fixed for the lifetime of one [`TerrainWorld`]; changing
//! them means building a new world. Configs can be written inline or loaded
//! from TOML.
//!
//! [`TerrainWorld`]: crate::TerrainWorld

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Which meshing strategy turns a heightmap into triangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MesherKind {
  /// Regular quad tessellation: two triangles per heightmap cell.
  #[default]
  Grid,
  /// Gradient-weighted Delaunay triangulation: dense where steep, sparse
  /// where flat, bounded by a per-chunk point budget.
  Adaptive,
}

/// Errors rejected when a [`TerrainConfig`] is validated or loaded.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
  /// `unload_distance <= load_distance` would unload chunks that are
  /// immediately reloaded on the next boundary crossing.
  #[error("unload distance {unload} must be strictly greater than load distance {load}")]
  Thrashing { load: i32, unload: i32 },

  #[error("chunk size must be at least 1 tile")]
  InvalidChunkSize,

  #[error("tile scale must be positive, got {0}")]
  InvalidTileScale(f32),

  #[error("load distance must be non-negative, got {0}")]
  InvalidLoadDistance(i32),

  #[error("height scale must be positive, got {0}")]
  InvalidHeightScale(f32),

  #[error("base resolution {base} must be >= min resolution {min} and min >= 1")]
  InvalidResolution { base: u32, min: u32 },

  #[error("fractal octave count must be at least 1")]
  InvalidOctaves,

  #[error("adaptive mesher needs a point budget of at least 3, got {0}")]
  InvalidPointBudget(usize),

  #[error("elevation palette needs at least 2 stops, got {0}")]
  InvalidPalette(usize),

  #[error("failed to read config file: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
}

/// Configuration surface for one terrain world.
///
/// Defaults mirror the endless-runner tuning: 16-tile chunks at 5 world
/// units per tile (an 80-unit chunk), load radius 3, unload radius 5.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
  /// Tiles per chunk side.
  pub chunk_size: u32,
  /// World units per tile.
  pub tile_scale: f32,
  /// Chunks within this Manhattan distance of the player are resident.
  pub load_distance: i32,
  /// Chunks beyond this Manhattan distance are evicted. Must be strictly
  /// greater than `load_distance`.
  pub unload_distance: i32,
  /// Tiles per chunk side meshed at full detail. The effective tile count
  /// degrades with camera distance down to `min_resolution`.
  pub base_resolution: u32,
  /// Lower bound on the LOD-degraded tile count.
  pub min_resolution: u32,
  /// Point budget per chunk for the adaptive mesher.
  pub max_points: usize,
  /// Fractal octave count for multi-scale sampling.
  pub octaves: u32,
  /// Frequency multiplier between fractal octaves.
  pub lacunarity: f64,
  /// Amplitude multiplier between fractal octaves.
  pub persistence: f64,
  /// World coordinates are divided by this before noise lookup, so terrain
  /// wavelength is independent of chunk geometry.
  pub noise_frequency: f64,
  /// Multiplier applied to raw noise heights on the vertical axis.
  pub height_scale: f32,
  /// Whether region sampling sums fractal octaves or takes a single sample.
  pub fractal: bool,
  /// Meshing strategy.
  pub mesher: MesherKind,
  /// Elevation palette stops, low to high, linear RGB in [0, 1].
  pub palette: Vec<[f32; 3]>,
}

impl Default for TerrainConfig {
  fn default() -> Self {
    Self {
      chunk_size: 16,
      tile_scale: 5.0,
      load_distance: 3,
      unload_distance: 5,
      base_resolution: 16,
      min_resolution: 4,
      max_points: 256,
      octaves: 4,
      lacunarity: 2.0,
      persistence: 0.5,
      noise_frequency: 20.0,
      height_scale: 10.0,
      fractal: false,
      mesher: MesherKind::Grid,
      palette: default_palette(),
    }
  }
}

/// Seven-stop gradient from deep water through grass and rock to snow.
pub fn default_palette() -> Vec<[f32; 3]> {
  vec![
    [0.05, 0.12, 0.28], // deep water
    [0.10, 0.32, 0.52], // shallows
    [0.76, 0.70, 0.50], // sand
    [0.33, 0.52, 0.24], // grass
    [0.20, 0.36, 0.18], // forest
    [0.48, 0.46, 0.44], // rock
    [1.00, 1.00, 1.00], // snow
  ]
}

impl TerrainConfig {
  /// World-space side length of one chunk.
  pub fn chunk_world_size(&self) -> f32 {
    self.chunk_size as f32 * self.tile_scale
  }

  /// Maximum camera distance used to normalize LOD falloff: the diagonal
  /// reach of the loaded area.
  pub fn max_lod_distance(&self) -> f32 {
    self.load_distance as f32 * self.chunk_world_size() * std::f32::consts::SQRT_2
  }

  /// Rejects configurations that violate the streaming contract.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.chunk_size == 0 {
      return Err(ConfigError::InvalidChunkSize);
    }
    if !(self.tile_scale > 0.0) {
      return Err(ConfigError::InvalidTileScale(self.tile_scale));
    }
    // The adaptive mesher divides centroid heights by this to recover
    // normalized elevation; zero would poison every color with NaN.
    if !(self.height_scale > 0.0) {
      return Err(ConfigError::InvalidHeightScale(self.height_scale));
    }
    if self.load_distance < 0 {
      return Err(ConfigError::InvalidLoadDistance(self.load_distance));
    }
    if self.unload_distance <= self.load_distance {
      return Err(ConfigError::Thrashing {
        load: self.load_distance,
        unload: self.unload_distance,
      });
    }
    if self.min_resolution < 1 || self.base_resolution < self.min_resolution {
      return Err(ConfigError::InvalidResolution {
        base: self.base_resolution,
        min: self.min_resolution,
      });
    }
    if self.octaves == 0 {
      return Err(ConfigError::InvalidOctaves);
    }
    if self.max_points < 3 {
      return Err(ConfigError::InvalidPointBudget(self.max_points));
    }
    if self.palette.len() < 2 {
      return Err(ConfigError::InvalidPalette(self.palette.len()));
    }
    Ok(())
  }

  /// Parses and validates a config from TOML text.
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  /// Loads and validates a config from a TOML file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Self::from_toml_str(&text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_is_valid() {
    assert!(TerrainConfig::default().validate().is_ok());
  }

  #[test]
  fn rejects_thrashing_distances() {
    let config = TerrainConfig {
      load_distance: 5,
      unload_distance: 5,
      ..Default::default()
    };
    assert!(matches!(
      config.validate(),
      Err(ConfigError::Thrashing { load: 5, unload: 5 })
    ));
  }

  #[test]
  fn rejects_degenerate_geometry() {
    let config = TerrainConfig {
      chunk_size: 0,
      ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidChunkSize)));

    let config = TerrainConfig {
      tile_scale: 0.0,
      ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidTileScale(_))));

    let config = TerrainConfig {
      min_resolution: 0,
      ..Default::default()
    };
    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidResolution { .. })
    ));

    let config = TerrainConfig {
      height_scale: 0.0,
      ..Default::default()
    };
    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidHeightScale(_))
    ));
  }

  #[test]
  fn chunk_world_size_matches_tiles() {
    let config = TerrainConfig::default();
    assert_eq!(config.chunk_world_size(), 80.0);
  }

  #[test]
  fn toml_round_trip() {
    let config = TerrainConfig {
      mesher: MesherKind::Adaptive,
      octaves: 6,
      ..Default::default()
    };
    let text = toml::to_string(&config).unwrap();
    let back = TerrainConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, config);
  }

  #[test]
  fn partial_toml_fills_defaults() {
    let config = TerrainConfig::from_toml_str("chunk_size = 30\ntile_scale = 5.0\n").unwrap();
    assert_eq!(config.chunk_size, 30);
    assert_eq!(config.load_distance, TerrainConfig::default().load_distance);
  }

  #[test]
  fn load_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "unload_distance = 7\n").unwrap();
    let config = TerrainConfig::load(file.path()).unwrap();
    assert_eq!(config.unload_distance, 7);
  }

  #[test]
  fn invalid_file_is_rejected() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "load_distance = 4\nunload_distance = 2\n").unwrap();
    assert!(matches!(
      TerrainConfig::load(file.path()),
      Err(ConfigError::Thrashing { .. })
    ));
  }
}
