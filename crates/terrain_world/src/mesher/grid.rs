//! Regular-grid tessellation.
//!
//! Every interior heightmap quad becomes four corner vertices and two
//! triangles split along the same fixed diagonal, so neighboring quads never
//! produce mismatched seams. Deterministic, O(N²) triangles, no adaptivity.

use crate::elevation::ElevationPalette;
use crate::heightmap::Heightmap;
use crate::mesh::TerrainMesh;

/// Tessellates a heightmap into flat-shaded triangles.
///
/// Heights are multiplied by `height_scale` on the vertical (z) axis; vertex
/// colors come from the elevation palette over the raw noise range [-1, 1].
/// A grid with fewer than 2 samples on either axis yields an empty mesh.
pub fn mesh_heightmap(
  map: &Heightmap,
  palette: &ElevationPalette,
  height_scale: f32,
) -> TerrainMesh {
  let width = map.width();
  let height = map.height();
  if width < 2 || height < 2 {
    return TerrainMesh::default();
  }

  let quads = ((width - 1) as usize) * ((height - 1) as usize);
  let mut mesh = TerrainMesh::default();
  mesh.positions.reserve(quads * 4);
  mesh.colors.reserve(quads * 4);
  mesh.indices.reserve(quads * 6);

  for row in 0..height - 1 {
    for col in 0..width - 1 {
      let base = mesh.positions.len() as u32;

      // The four quad corners, z from the scaled height samples.
      for (dc, dr) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let world = map.world_at(col + dc, row + dr);
        let raw = map.get((col + dc) as i64, (row + dr) as i64);
        mesh.positions.push([world.x, world.y, raw * height_scale]);
        mesh.colors.push(palette.sample((raw + 1.0) * 0.5));
      }

      // Fixed diagonal: (0,1,2) and (1,3,2) for every quad.
      mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
      mesh
        .indices
        .extend_from_slice(&[base + 1, base + 3, base + 2]);
    }
  }

  mesh.compute_flat_normals();
  mesh
}
