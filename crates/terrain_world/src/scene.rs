//! The narrow boundary between the terrain engine and a render engine.
//!
//! The engine only ever asks a scene to attach or detach geometry by handle;
//! it assumes nothing about the renderer's object model. Implement [`Scene`]
//! for whatever scene graph or ECS hosts the meshes.

use crate::mesh::TerrainMesh;

/// Opaque handle identifying one chunk's geometry inside a scene.
///
/// Handles are unique for the lifetime of a [`TerrainWorld`] and never
/// reused.
///
/// [`TerrainWorld`]: crate::TerrainWorld
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u64);

impl MeshId {
  pub(crate) const fn new(raw: u64) -> Self {
    Self(raw)
  }

  /// Raw handle value, for renderers that key their own maps by it.
  pub const fn raw(self) -> u64 {
    self.0
  }
}

/// Capability interface the terrain engine requires from its host.
pub trait Scene {
  /// Called once when a chunk becomes resident. The mesh borrow is only
  /// valid for the duration of the call; renderers upload or copy what they
  /// need.
  fn add(&mut self, id: MeshId, mesh: &TerrainMesh);

  /// Called once when a chunk is evicted, before its geometry is disposed.
  fn remove(&mut self, id: MeshId);
}

/// A scene that ignores everything, for headless use and benchmarks.
#[derive(Debug, Default)]
pub struct NullScene;

impl Scene for NullScene {
  fn add(&mut self, _id: MeshId, _mesh: &TerrainMesh) {}
  fn remove(&mut self, _id: MeshId) {}
}
