//! Infinite procedural terrain streaming.
//!
//! A [`TerrainWorld`] keeps a window of generated terrain chunks resident
//! around a moving player over an unbounded plane. Each chunk is a seeded
//! Perlin heightmap turned into triangle geometry by one of two meshers (a
//! regular grid or a gradient-adaptive Delaunay triangulation), colored by
//! elevation, and handed to a host [`Scene`] for rendering.
//!
//! ```no_run
//! use glam::Vec2;
//! use terrain_world::{NullScene, TerrainConfig, TerrainWorld};
//!
//! let mut world = TerrainWorld::new(TerrainConfig::default(), 1337)?;
//! let mut scene = NullScene;
//!
//! // Each frame: a no-op unless the player crossed a chunk boundary.
//! world.update(&mut scene, Vec2::new(12.0, -40.0), None);
//! println!("{:?}", world.stats());
//! # Ok::<(), terrain_world::ConfigError>(())
//! ```
//!
//! Generation is deterministic: the same seed and configuration produce the
//! same terrain on every run, and neighboring chunks sample shared borders
//! to bit-identical heights.

pub mod config;
pub mod coords;
pub mod elevation;
pub mod field;
pub mod heightmap;
pub mod lod;
pub mod mesh;
pub mod mesher;
pub mod scene;
pub mod world;

pub use config::{default_palette, ConfigError, MesherKind, TerrainConfig};
pub use coords::ChunkPos;
pub use elevation::ElevationPalette;
pub use field::NoiseField;
pub use heightmap::{FractalParams, Heightmap, HeightmapSampler};
pub use lod::{effective_resolution, lod_factor, MIN_LOD_FACTOR};
pub use mesh::TerrainMesh;
pub use scene::{MeshId, NullScene, Scene};
pub use world::{ChunkRecord, TerrainStats, TerrainWorld};
