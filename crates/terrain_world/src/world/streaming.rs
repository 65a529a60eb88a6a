//! Residency bookkeeping: which chunks to load and which to evict when the
//! player crosses a chunk boundary.

use std::collections::HashMap;

use crate::coords::ChunkPos;

use super::chunk::ChunkRecord;

/// The work a boundary crossing produces.
#[derive(Debug, Default)]
pub(crate) struct StreamingDelta {
  pub to_load: Vec<ChunkPos>,
  pub to_evict: Vec<ChunkPos>,
}

/// All positions within `radius` Manhattan distance of `center`.
pub(crate) fn positions_in_range(
  center: ChunkPos,
  radius: i32,
) -> impl Iterator<Item = ChunkPos> {
  (-radius..=radius).flat_map(move |dx| {
    let rem = radius - dx.abs();
    (-rem..=rem).map(move |dy| ChunkPos::new(center.x + dx, center.y + dy))
  })
}

/// Compares the resident set against the player's new chunk.
///
/// Positions inside `load_distance` that are not resident go in `to_load`;
/// resident positions strictly beyond `unload_distance` go in `to_evict`.
/// Chunks in the hysteresis band between the two radii are left alone.
pub(crate) fn compute_delta(
  resident: &HashMap<ChunkPos, ChunkRecord>,
  center: ChunkPos,
  load_distance: i32,
  unload_distance: i32,
) -> StreamingDelta {
  let mut delta = StreamingDelta::default();
  for pos in positions_in_range(center, load_distance) {
    if !resident.contains_key(&pos) {
      delta.to_load.push(pos);
    }
  }
  for pos in resident.keys() {
    if pos.manhattan_distance(center) > unload_distance {
      delta.to_evict.push(*pos);
    }
  }
  delta
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn range_is_a_manhattan_disc() {
    let center = ChunkPos::new(0, 0);
    let positions: Vec<_> = positions_in_range(center, 3).collect();
    // 2r^2 + 2r + 1 positions in a Manhattan disc of radius r.
    assert_eq!(positions.len(), 25);
    for pos in &positions {
      assert!(pos.manhattan_distance(center) <= 3);
    }
    assert!(positions.contains(&ChunkPos::new(3, 0)));
    assert!(!positions.contains(&ChunkPos::new(2, 2)));
  }

  #[test]
  fn radius_zero_is_just_the_center() {
    let positions: Vec<_> = positions_in_range(ChunkPos::new(4, -2), 0).collect();
    assert_eq!(positions, vec![ChunkPos::new(4, -2)]);
  }

  #[test]
  fn empty_resident_set_loads_everything_in_range() {
    let resident = HashMap::new();
    let delta = compute_delta(&resident, ChunkPos::new(0, 0), 2, 4);
    assert_eq!(delta.to_load.len(), 13);
    assert!(delta.to_evict.is_empty());
  }
}
