//! The chunk manager: owns residency, generation, and scene lifetime.
//!
//! [`TerrainWorld::update`] is the single driver. It converts the player's
//! world position to a chunk coordinate, returns immediately if the chunk is
//! unchanged, and otherwise loads every missing chunk within the load radius
//! and evicts every resident chunk beyond the unload radius. Generation is
//! synchronous: when `update` returns, the resident set matches the player's
//! position exactly.

mod chunk;
mod streaming;

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use rayon::prelude::*;
// WASM compat: std::time::Instant panics on wasm32
use web_time::Instant;

use crate::config::{ConfigError, TerrainConfig};
use crate::coords::ChunkPos;
use crate::elevation::ElevationPalette;
use crate::field::NoiseField;
use crate::heightmap::{FractalParams, Heightmap, HeightmapSampler};
use crate::lod::{effective_resolution, lod_factor};
use crate::mesh::TerrainMesh;
use crate::mesher;
use crate::scene::{MeshId, Scene};

pub use chunk::ChunkRecord;

/// Point-in-time streaming counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainStats {
  /// Chunks currently resident.
  pub loaded_chunks: usize,
  /// Vertices across all resident chunk meshes.
  pub total_vertices: usize,
}

/// An unbounded terrain surface streamed around a moving player.
pub struct TerrainWorld {
  config: TerrainConfig,
  sampler: HeightmapSampler,
  palette: ElevationPalette,
  chunks: HashMap<ChunkPos, ChunkRecord>,
  last_player_chunk: Option<ChunkPos>,
  next_mesh_id: u64,
}

impl TerrainWorld {
  /// Builds an empty world over a seeded noise field.
  ///
  /// The configuration is validated here; nothing is generated until the
  /// first [`update`](Self::update).
  pub fn new(config: TerrainConfig, seed: u32) -> Result<Self, ConfigError> {
    config.validate()?;

    let field = NoiseField::new(seed);
    let mut sampler = HeightmapSampler::new(field, config.noise_frequency);
    if config.fractal {
      sampler = sampler.with_fractal(FractalParams {
        octaves: config.octaves,
        lacunarity: config.lacunarity,
        persistence: config.persistence,
      });
    }
    let palette = ElevationPalette::from_stops(&config.palette);

    log::info!(
      "terrain world: seed {seed}, chunk {} wu, load {} / unload {}",
      config.chunk_world_size(),
      config.load_distance,
      config.unload_distance,
    );

    Ok(Self {
      config,
      sampler,
      palette,
      chunks: HashMap::new(),
      last_player_chunk: None,
      next_mesh_id: 0,
    })
  }

  /// The world's immutable configuration.
  pub fn config(&self) -> &TerrainConfig {
    &self.config
  }

  /// The seed the noise field was built with.
  pub fn seed(&self) -> u32 {
    self.sampler.field().seed()
  }

  /// Advances streaming for the player's current position.
  ///
  /// A no-op unless the player crossed a chunk boundary since the last call
  /// (or this is the first call). `camera`, when given, degrades the mesh
  /// resolution of newly loaded chunks with distance; already resident
  /// chunks keep the resolution they were generated at.
  pub fn update<S: Scene>(&mut self, scene: &mut S, player: Vec2, camera: Option<Vec3>) {
    let player_chunk = ChunkPos::from_world(player, self.config.chunk_world_size());
    if self.last_player_chunk == Some(player_chunk) {
      return;
    }
    self.last_player_chunk = Some(player_chunk);
    log::debug!("player entered chunk ({}, {})", player_chunk.x, player_chunk.y);

    let delta = streaming::compute_delta(
      &self.chunks,
      player_chunk,
      self.config.load_distance,
      self.config.unload_distance,
    );

    for pos in streaming::positions_in_range(player_chunk, self.config.load_distance) {
      if let Some(record) = self.chunks.get_mut(&pos) {
        record.touch();
      }
    }

    // Chunk generation is pure, so the whole batch runs in parallel and is
    // attached to the scene in order afterwards.
    let config = &self.config;
    let sampler = self.sampler;
    let palette = &self.palette;
    let generated: Vec<(ChunkPos, Heightmap, TerrainMesh)> = delta
      .to_load
      .par_iter()
      .map(|&pos| {
        let (map, mesh) = generate_chunk(config, &sampler, palette, pos, camera);
        (pos, map, mesh)
      })
      .collect();

    for (pos, heightmap, mesh) in generated {
      let mesh_id = MeshId::new(self.next_mesh_id);
      self.next_mesh_id += 1;
      scene.add(mesh_id, &mesh);
      log::debug!(
        "loaded chunk ({}, {}): {} vertices",
        pos.x,
        pos.y,
        mesh.vertex_count()
      );
      self.chunks.insert(
        pos,
        ChunkRecord {
          pos,
          heightmap,
          mesh,
          mesh_id,
          world_offset: pos.origin(self.config.chunk_world_size()),
          last_access: Instant::now(),
        },
      );
    }

    for pos in delta.to_evict {
      if let Some(record) = self.chunks.get_mut(&pos) {
        scene.remove(record.mesh_id);
        record.mesh.dispose();
        log::debug!("unloaded chunk ({}, {})", pos.x, pos.y);
      }
      self.chunks.remove(&pos);
    }
  }

  /// Whether a chunk is currently resident.
  pub fn is_loaded(&self, pos: ChunkPos) -> bool {
    self.chunks.contains_key(&pos)
  }

  /// The resident chunk at `pos`, if any.
  pub fn chunk(&self, pos: ChunkPos) -> Option<&ChunkRecord> {
    self.chunks.get(&pos)
  }

  /// Iterates over all resident chunks in no particular order.
  pub fn loaded_chunks(&self) -> impl Iterator<Item = &ChunkRecord> {
    self.chunks.values()
  }

  /// Counts resident chunks and their vertices. Computed on demand, never
  /// cached.
  pub fn stats(&self) -> TerrainStats {
    TerrainStats {
      loaded_chunks: self.chunks.len(),
      total_vertices: self.chunks.values().map(|c| c.mesh.vertex_count()).sum(),
    }
  }

  /// Scaled terrain height under a world position, or `None` if the chunk
  /// containing it is not resident.
  pub fn height_at(&self, world: Vec2) -> Option<f32> {
    let pos = ChunkPos::from_world(world, self.config.chunk_world_size());
    let record = self.chunks.get(&pos)?;
    Some(record.heightmap.sample_world(world) * self.config.height_scale)
  }

  /// Detaches and disposes every resident chunk. The world is reusable
  /// afterwards; the next [`update`](Self::update) streams from scratch.
  pub fn dispose<S: Scene>(&mut self, scene: &mut S) {
    for record in self.chunks.values_mut() {
      scene.remove(record.mesh_id);
      record.mesh.dispose();
    }
    let count = self.chunks.len();
    self.chunks.clear();
    self.last_player_chunk = None;
    log::info!("terrain world disposed, {count} chunks released");
  }
}

/// Samples and meshes one chunk. Pure: equal inputs give equal outputs.
fn generate_chunk(
  config: &TerrainConfig,
  sampler: &HeightmapSampler,
  palette: &ElevationPalette,
  pos: ChunkPos,
  camera: Option<Vec3>,
) -> (Heightmap, TerrainMesh) {
  let chunk_world_size = config.chunk_world_size();
  let offset = pos.origin(chunk_world_size);

  let factor = match camera {
    Some(camera) => {
      let center = pos.center(chunk_world_size);
      let distance = camera.distance(Vec3::new(center.x, center.y, 0.0));
      lod_factor(distance, config.max_lod_distance())
    }
    None => 1.0,
  };
  let tiles = effective_resolution(config.base_resolution, config.min_resolution, factor);

  // N tiles need N+1 samples per side; the extra column and row land on the
  // neighbor's border so shared edges tile exactly.
  let samples = tiles + 1;
  let step = chunk_world_size / tiles as f32;
  let map = sampler.sample_region(samples, samples, step, offset);

  let mesh = mesher::mesh_chunk(
    config.mesher,
    &map,
    palette,
    config.height_scale,
    chunk_world_size,
    config.max_points,
    chunk_rng_seed(sampler.field().seed(), pos),
  );
  (map, mesh)
}

/// Mixes the world seed and a chunk position into a per-chunk RNG seed.
fn chunk_rng_seed(seed: u32, pos: ChunkPos) -> u64 {
  let mut h = seed as u64 ^ 0x9e37_79b9_7f4a_7c15;
  for part in [pos.x as u32 as u64, pos.y as u32 as u64] {
    h ^= part;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
  }
  h
}
