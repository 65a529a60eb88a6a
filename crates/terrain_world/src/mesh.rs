//! Renderable triangle geometry produced by the meshers.
//!
//! [`TerrainMesh`] is plain buffer data (positions, normals, per-vertex
//! colors, triangle indices) with an explicit disposal step so the streaming
//! tests can verify that evicted chunks release their geometry. The render
//! engine consuming these buffers is entirely outside this crate.

use glam::Vec3;

/// Indexed triangle geometry for one chunk.
#[derive(Clone, Debug, Default)]
pub struct TerrainMesh {
  pub positions: Vec<[f32; 3]>,
  pub normals: Vec<[f32; 3]>,
  pub colors: Vec<[f32; 4]>,
  pub indices: Vec<u32>,
  disposed: bool,
}

impl TerrainMesh {
  /// Number of vertices in the buffer.
  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  /// Number of triangles referenced by the index list.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// True when the mesh has no triangles.
  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }

  /// Re-expands the mesh so every triangle owns its three vertices, each
  /// carrying the face normal. Facets stay visually distinct (flat shading),
  /// the canonical look for low-poly terrain.
  ///
  /// Per-vertex colors are carried through the expansion; the index list
  /// becomes the identity.
  pub fn compute_flat_normals(&mut self) {
    let mut positions = Vec::with_capacity(self.indices.len());
    let mut normals = Vec::with_capacity(self.indices.len());
    let mut colors = Vec::with_capacity(self.indices.len());

    for tri in self.indices.chunks_exact(3) {
      let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
      let normal = face_normal(
        Vec3::from(self.positions[i0]),
        Vec3::from(self.positions[i1]),
        Vec3::from(self.positions[i2]),
      );
      for &i in &[i0, i1, i2] {
        positions.push(self.positions[i]);
        normals.push(normal.to_array());
        colors.push(self.colors[i]);
      }
    }

    self.indices = (0..positions.len() as u32).collect();
    self.positions = positions;
    self.normals = normals;
    self.colors = colors;
  }

  /// Computes area-weighted smooth normals over the shared vertex buffer.
  pub fn compute_smooth_normals(&mut self) {
    let mut accum = vec![Vec3::ZERO; self.positions.len()];

    for tri in self.indices.chunks_exact(3) {
      let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
      let a = Vec3::from(self.positions[i0]);
      let b = Vec3::from(self.positions[i1]);
      let c = Vec3::from(self.positions[i2]);
      // Unnormalized cross product weights the contribution by triangle area.
      let n = (b - a).cross(c - a);
      accum[i0] += n;
      accum[i1] += n;
      accum[i2] += n;
    }

    self.normals = accum
      .into_iter()
      .map(|n| n.try_normalize().unwrap_or(Vec3::Z).to_array())
      .collect();
  }

  /// Releases all geometry buffers. Idempotent; the mesh reports zero
  /// vertices afterwards.
  pub fn dispose(&mut self) {
    self.positions = Vec::new();
    self.normals = Vec::new();
    self.colors = Vec::new();
    self.indices = Vec::new();
    self.disposed = true;
  }

  /// True once [`dispose`](Self::dispose) has run.
  pub fn is_disposed(&self) -> bool {
    self.disposed
  }
}

/// Normal of a triangle; Z-up fallback for degenerate (zero-area) input.
fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
  (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Z)
}
