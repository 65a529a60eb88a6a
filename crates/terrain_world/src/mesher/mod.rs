//! Heightmap-to-geometry strategies.
//!
//! Two interchangeable meshers consume a heightmap plus its world placement
//! and produce triangle geometry with zero side effects:
//!
//! - [`grid`]: regular quad tessellation, uniform detail.
//! - [`adaptive`]: gradient-weighted Delaunay triangulation, dense where the
//!   terrain is steep, bounded by a point budget.

pub mod adaptive;
pub mod gradient;
pub mod grid;

use crate::config::MesherKind;
use crate::elevation::ElevationPalette;
use crate::heightmap::Heightmap;
use crate::mesh::TerrainMesh;

/// Meshes one chunk heightmap with the configured strategy.
///
/// `rng_seed` only affects the adaptive strategy's weighted point draw; the
/// grid strategy is fully determined by the heightmap.
pub fn mesh_chunk(
  kind: MesherKind,
  map: &Heightmap,
  palette: &ElevationPalette,
  height_scale: f32,
  chunk_world_size: f32,
  max_points: usize,
  rng_seed: u64,
) -> TerrainMesh {
  match kind {
    MesherKind::Grid => grid::mesh_heightmap(map, palette, height_scale),
    MesherKind::Adaptive => adaptive::mesh_heightmap(
      map,
      palette,
      height_scale,
      chunk_world_size,
      max_points,
      rng_seed,
    ),
  }
}
