//! Gradient-adaptive Delaunay meshing.
//!
//! Concentrates triangle density where the terrain is steep and spends few
//! triangles on flat ground, with a hard per-chunk point budget. Boundary
//! samples are taken verbatim from the grid so neighboring chunks share
//! exact edge vertices and tile without cracks.

use std::collections::{HashMap, HashSet};

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spade::handles::FixedVertexHandle;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::elevation::ElevationPalette;
use crate::heightmap::Heightmap;
use crate::mesh::TerrainMesh;
use crate::mesher::gradient::{self, GradientMap};

/// Keeps flat regions sampled: every interior cell gets at least this much
/// selection weight even at zero gradient.
const WEIGHT_EPSILON: f32 = 0.01;

/// Builds an adaptive mesh from a heightmap.
///
/// `max_points` bounds the selected point count (forced boundary points
/// included); the sampler gives up after `2 × max_points` draw attempts so a
/// perfectly flat chunk cannot loop forever. Fewer than 3 usable points
/// yields an empty mesh rather than an error.
///
/// `rng_seed` fixes the weighted draw, so regenerating the same chunk with
/// the same seed reproduces the same mesh exactly.
pub fn mesh_heightmap(
  map: &Heightmap,
  palette: &ElevationPalette,
  height_scale: f32,
  chunk_world_size: f32,
  max_points: usize,
  rng_seed: u64,
) -> TerrainMesh {
  let cells = select_points(map, max_points, rng_seed);
  if cells.len() < 3 {
    log::debug!(
      "adaptive mesher: only {} points available, emitting empty mesh",
      cells.len()
    );
    return TerrainMesh::default();
  }

  // World-space positions for every selected grid cell.
  let points: Vec<Vec3> = cells
    .iter()
    .map(|&(col, row)| {
      let xy = map.world_at(col, row);
      let raw = map.get(col as i64, row as i64);
      Vec3::new(xy.x, xy.y, raw * height_scale)
    })
    .collect();

  let triangles = triangulate_xy(&points);
  let max_edge = chunk_world_size * 0.5;
  build_mesh(&points, &triangles, palette, height_scale, max_edge)
}

/// Grid cells to triangulate: forced boundary samples plus a
/// gradient-weighted draw over the interior.
fn select_points(map: &Heightmap, max_points: usize, rng_seed: u64) -> Vec<(u32, u32)> {
  let width = map.width();
  let height = map.height();
  if width == 0 || height == 0 {
    return Vec::new();
  }

  let mut selected: Vec<(u32, u32)> = Vec::new();
  let mut taken: HashSet<(u32, u32)> = HashSet::new();
  let mut take = |cell: (u32, u32), selected: &mut Vec<(u32, u32)>| {
    if taken.insert(cell) {
      selected.push(cell);
    }
  };

  // Corners and a sparse border ring, spaced ~1/8 of the side apart. These
  // are shared verbatim with neighboring chunks.
  for cell in boundary_cells(width, height) {
    take(cell, &mut selected);
  }

  if width < 3 || height < 3 || selected.len() >= max_points {
    return selected;
  }

  // Weighted interior draw: steep cells are proportionally more likely,
  // flat cells keep an epsilon chance.
  let grad = gradient::sobel_magnitude(map);
  let (cells, cumulative) = interior_distribution(&grad);
  if cells.is_empty() {
    return selected;
  }
  let total = *cumulative.last().expect("non-empty distribution");

  let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
  let attempt_cap = max_points * 2;
  let mut attempts = 0;
  while selected.len() < max_points && attempts < attempt_cap {
    attempts += 1;
    let r = rng.gen::<f32>() * total;
    // Inverse-CDF lookup: first cumulative weight >= r.
    let idx = cumulative.partition_point(|&c| c < r).min(cells.len() - 1);
    take(cells[idx], &mut selected);
  }

  selected
}

/// Corner and edge-ring cells for a `width × height` grid.
fn boundary_cells(width: u32, height: u32) -> Vec<(u32, u32)> {
  let right = width - 1;
  let top = height - 1;
  let mut cells = vec![(0, 0), (right, 0), (0, top), (right, top)];

  let col_step = (width / 8).max(1);
  let mut col = col_step;
  while col < right {
    cells.push((col, 0));
    cells.push((col, top));
    col += col_step;
  }

  let row_step = (height / 8).max(1);
  let mut row = row_step;
  while row < top {
    cells.push((0, row));
    cells.push((right, row));
    row += row_step;
  }

  cells
}

/// Interior cells with their cumulative selection weights.
fn interior_distribution(grad: &GradientMap) -> (Vec<(u32, u32)>, Vec<f32>) {
  let width = grad.width();
  let height = grad.height();
  let max = grad.max();

  let mut cells = Vec::new();
  let mut cumulative = Vec::new();
  let mut running = 0.0f32;

  for row in 1..height.saturating_sub(1) {
    for col in 1..width.saturating_sub(1) {
      let weight = if max > 0.0 {
        grad.get(col, row) / max + WEIGHT_EPSILON
      } else {
        WEIGHT_EPSILON
      };
      running += weight;
      cells.push((col, row));
      cumulative.push(running);
    }
  }

  (cells, cumulative)
}

/// Delaunay-triangulates the (x, y) projection of the point set, returning
/// triangles as indices into `points`.
fn triangulate_xy(points: &[Vec3]) -> Vec<[usize; 3]> {
  let mut dt: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
  let mut handle_to_index: HashMap<FixedVertexHandle, usize> = HashMap::new();

  for (index, p) in points.iter().enumerate() {
    let handle = dt
      .insert(Point2::new(p.x as f64, p.y as f64))
      .expect("finite terrain point rejected by triangulation");
    handle_to_index.insert(handle, index);
  }

  let mut triangles = Vec::new();
  for face in dt.inner_faces() {
    let verts = face.vertices();
    let lookup = |i: usize| handle_to_index.get(&verts[i].fix()).copied();
    if let (Some(a), Some(b), Some(c)) = (lookup(0), lookup(1), lookup(2)) {
      triangles.push([a, b, c]);
    }
  }
  triangles
}

/// Assembles the final mesh: drops convex-hull skirt triangles, colors each
/// kept triangle by its centroid elevation, dedups the shared vertex buffer,
/// then expands for flat shading.
fn build_mesh(
  points: &[Vec3],
  triangles: &[[usize; 3]],
  palette: &ElevationPalette,
  height_scale: f32,
  max_edge: f32,
) -> TerrainMesh {
  // Shared vertex buffer: only points referenced by retained triangles.
  let mut remap: HashMap<usize, u32> = HashMap::new();
  let mut shared: Vec<Vec3> = Vec::new();
  let mut retained: Vec<([u32; 3], [f32; 4])> = Vec::new();

  for &[a, b, c] in triangles {
    let (pa, pb, pc) = (points[a], points[b], points[c]);
    if longest_edge_xy(pa, pb, pc) > max_edge {
      // Convex-hull skirt triangle spanning the point-set boundary.
      continue;
    }

    let centroid_z = (pa.z + pb.z + pc.z) / 3.0;
    let normalized = (centroid_z / height_scale + 1.0) * 0.5;
    let color = palette.sample(normalized);

    let mut index_of = |point_index: usize| -> u32 {
      *remap.entry(point_index).or_insert_with(|| {
        shared.push(points[point_index]);
        shared.len() as u32 - 1
      })
    };
    let ids = [index_of(a), index_of(b), index_of(c)];
    retained.push((ids, color));
  }

  // Flat-shading expansion: three vertices per triangle, each carrying the
  // face normal and the triangle's centroid color.
  let mut mesh = TerrainMesh::default();
  mesh.positions.reserve(retained.len() * 3);
  for ([a, b, c], color) in retained {
    let (pa, pb, pc) = (shared[a as usize], shared[b as usize], shared[c as usize]);
    let normal = (pb - pa)
      .cross(pc - pa)
      .try_normalize()
      .unwrap_or(Vec3::Z)
      .to_array();
    for p in [pa, pb, pc] {
      let index = mesh.positions.len() as u32;
      mesh.positions.push(p.to_array());
      mesh.normals.push(normal);
      mesh.colors.push(color);
      mesh.indices.push(index);
    }
  }
  mesh
}

/// Length of the longest triangle edge in the ground plane.
fn longest_edge_xy(a: Vec3, b: Vec3, c: Vec3) -> f32 {
  let ab = Vec2::new(b.x - a.x, b.y - a.y).length();
  let bc = Vec2::new(c.x - b.x, c.y - b.y).length();
  let ca = Vec2::new(a.x - c.x, a.y - c.y).length();
  ab.max(bc).max(ca)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn boundary_ring_includes_corners() {
    let cells = boundary_cells(17, 17);
    for corner in [(0, 0), (16, 0), (0, 16), (16, 16)] {
      assert!(cells.contains(&corner), "missing corner {corner:?}");
    }
    // Ring spacing of width/8 = 2 puts samples along every border.
    assert!(cells.contains(&(2, 0)));
    assert!(cells.contains(&(0, 2)));
    assert!(cells.contains(&(16, 2)));
    assert!(cells.contains(&(2, 16)));
  }

  #[test]
  fn tiny_grids_have_no_duplicate_boundary_cells() {
    let mut map = Heightmap::new(2, 2, 1.0, Vec2::ZERO);
    map.set(1, 1, 1.0);
    let selected = select_points(&map, 64, 0);
    let unique: HashSet<_> = selected.iter().collect();
    assert_eq!(unique.len(), selected.len());
    assert_eq!(selected.len(), 4);
  }

  #[test]
  fn selection_respects_budget_and_cap() {
    let mut map = Heightmap::new(32, 32, 1.0, Vec2::ZERO);
    for row in 0..32 {
      for col in 0..32 {
        map.set(col, row, ((col * row) as f32).sin());
      }
    }
    let selected = select_points(&map, 40, 7);
    assert!(selected.len() <= 40);
    let unique: HashSet<_> = selected.iter().collect();
    assert_eq!(unique.len(), selected.len());
  }

  #[test]
  fn flat_map_still_selects_points() {
    // Zero gradient everywhere: weights reduce to epsilon alone.
    let map = Heightmap::new(16, 16, 1.0, Vec2::ZERO);
    let selected = select_points(&map, 64, 99);
    // Forced boundary points at minimum, plus whatever the capped draw got.
    assert!(selected.len() >= boundary_cells(16, 16).len());
  }

  #[test]
  fn selection_is_deterministic_per_seed() {
    let mut map = Heightmap::new(24, 24, 1.0, Vec2::ZERO);
    for row in 0..24 {
      for col in 0..24 {
        map.set(col, row, (col as f32 * 0.4).sin() * (row as f32 * 0.3).cos());
      }
    }
    assert_eq!(select_points(&map, 80, 5), select_points(&map, 80, 5));
    assert_ne!(select_points(&map, 80, 5), select_points(&map, 80, 6));
  }
}
