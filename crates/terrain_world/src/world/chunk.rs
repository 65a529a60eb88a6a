//! The unit of streaming: one resident chunk.

use glam::Vec2;
// WASM compat: std::time::Instant panics on wasm32
use web_time::Instant;

use crate::coords::ChunkPos;
use crate::heightmap::Heightmap;
use crate::mesh::TerrainMesh;
use crate::scene::MeshId;

/// A fully generated, scene-attached chunk.
///
/// Records are atomically present or absent in the manager's mapping; there
/// is no partially resident state.
#[derive(Debug)]
pub struct ChunkRecord {
  pub(crate) pos: ChunkPos,
  pub(crate) heightmap: Heightmap,
  pub(crate) mesh: TerrainMesh,
  pub(crate) mesh_id: MeshId,
  pub(crate) world_offset: Vec2,
  pub(crate) last_access: Instant,
}

impl ChunkRecord {
  /// Chunk grid position.
  pub fn pos(&self) -> ChunkPos {
    self.pos
  }

  /// The chunk's height samples.
  pub fn heightmap(&self) -> &Heightmap {
    &self.heightmap
  }

  /// The chunk's geometry.
  pub fn mesh(&self) -> &TerrainMesh {
    &self.mesh
  }

  /// Scene handle for the chunk's geometry.
  pub fn mesh_id(&self) -> MeshId {
    self.mesh_id
  }

  /// World-space origin of the chunk.
  pub fn world_offset(&self) -> Vec2 {
    self.world_offset
  }

  /// When the chunk was last inside the load range.
  pub fn last_access(&self) -> Instant {
    self.last_access
  }

  /// Marks the chunk as accessed now.
  pub(crate) fn touch(&mut self) {
    self.last_access = Instant::now();
  }
}
