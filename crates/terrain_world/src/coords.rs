//! Coordinate types for the chunked world.
//!
//! The ground plane is an unbounded 2D space of `f32` world coordinates;
//! height is derived from the noise field, never stored as position. Chunks
//! tile the plane without gaps: a chunk coordinate is the floor division of a
//! world position by the chunk's world-space side length.

use glam::Vec2;

/// Position in the chunk grid.
///
/// A proper composite key (two integers with `Hash`/`Eq`), not a formatted
/// string, so lookups never go through parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
  pub x: i32,
  pub y: i32,
}

impl ChunkPos {
  /// Creates a new chunk position.
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  /// Returns the chunk containing the given world position.
  ///
  /// Uses `floor` so negative world coordinates map correctly: world x of
  /// -0.5 with a chunk side of 80 lands in chunk -1, not chunk 0.
  pub fn from_world(world: Vec2, chunk_world_size: f32) -> Self {
    Self {
      x: (world.x / chunk_world_size).floor() as i32,
      y: (world.y / chunk_world_size).floor() as i32,
    }
  }

  /// World-space origin (minimum corner) of this chunk.
  pub fn origin(self, chunk_world_size: f32) -> Vec2 {
    Vec2::new(
      self.x as f32 * chunk_world_size,
      self.y as f32 * chunk_world_size,
    )
  }

  /// World-space center of this chunk.
  pub fn center(self, chunk_world_size: f32) -> Vec2 {
    self.origin(chunk_world_size) + Vec2::splat(chunk_world_size * 0.5)
  }

  /// Manhattan distance to another chunk, used for all range tests.
  pub fn manhattan_distance(self, other: ChunkPos) -> i32 {
    (self.x - other.x).abs() + (self.y - other.y).abs()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn world_to_chunk_positive() {
    assert_eq!(ChunkPos::from_world(Vec2::new(0.0, 0.0), 80.0), ChunkPos::new(0, 0));
    assert_eq!(ChunkPos::from_world(Vec2::new(79.9, 0.0), 80.0), ChunkPos::new(0, 0));
    assert_eq!(ChunkPos::from_world(Vec2::new(85.0, 0.0), 80.0), ChunkPos::new(1, 0));
  }

  #[test]
  fn world_to_chunk_negative() {
    // Floor division: anything below zero belongs to a negative chunk.
    assert_eq!(ChunkPos::from_world(Vec2::new(-0.5, 0.0), 80.0), ChunkPos::new(-1, 0));
    assert_eq!(ChunkPos::from_world(Vec2::new(-80.0, -1.0), 80.0), ChunkPos::new(-1, -1));
    assert_eq!(ChunkPos::from_world(Vec2::new(-80.5, 0.0), 80.0), ChunkPos::new(-2, 0));
  }

  #[test]
  fn origin_round_trips() {
    let pos = ChunkPos::new(-3, 7);
    let origin = pos.origin(80.0);
    assert_eq!(ChunkPos::from_world(origin, 80.0), pos);
    // Center stays inside the same chunk.
    assert_eq!(ChunkPos::from_world(pos.center(80.0), 80.0), pos);
  }

  #[test]
  fn manhattan_is_symmetric() {
    let a = ChunkPos::new(2, -1);
    let b = ChunkPos::new(-3, 4);
    assert_eq!(a.manhattan_distance(b), 10);
    assert_eq!(b.manhattan_distance(a), 10);
    assert_eq!(a.manhattan_distance(a), 0);
  }
}
