//! Distance-based level of detail.
//!
//! Nearby chunks mesh at full resolution; distant ones degrade smoothly via
//! an inverse quadratic falloff, never below 20% of base detail. Without a
//! camera the factor is always 1.0.

/// Lowest detail factor ever returned; distant terrain never fully
/// degenerates.
pub const MIN_LOD_FACTOR: f32 = 0.2;

/// Detail factor in [0.2, 1.0] for a viewer at `distance`, normalized
/// against `max_distance`.
///
/// Monotonically non-increasing in distance: `(1 - d/max)^2` clamped to the
/// floor. A non-positive `max_distance` (a zero load radius leaves nothing
/// to degrade over) always gives full detail.
pub fn lod_factor(distance: f32, max_distance: f32) -> f32 {
  if max_distance <= 0.0 {
    return 1.0;
  }
  let normalized = (distance / max_distance).min(1.0);
  let falloff = (1.0 - normalized).powi(2);
  falloff.max(MIN_LOD_FACTOR)
}

/// Effective grid resolution after applying a detail factor, floored at
/// `min_resolution`.
pub fn effective_resolution(base_resolution: u32, min_resolution: u32, factor: f32) -> u32 {
  ((base_resolution as f32 * factor).floor() as u32).max(min_resolution)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn canonical_points() {
    let max = 400.0;
    assert_eq!(lod_factor(0.0, max), 1.0);
    assert_eq!(lod_factor(max, max), MIN_LOD_FACTOR);
    // Halfway: (1 - 0.5)^2 = 0.25, above the floor.
    assert_eq!(lod_factor(max / 2.0, max), 0.25);
  }

  #[test]
  fn zero_range_means_full_detail() {
    // A single-chunk load radius makes the normalization range collapse;
    // the factor must not fall through to the floor via NaN.
    assert_eq!(lod_factor(0.0, 0.0), 1.0);
    assert_eq!(lod_factor(50.0, 0.0), 1.0);
    assert_eq!(lod_factor(0.0, -1.0), 1.0);
  }

  #[test]
  fn clamped_beyond_max_distance() {
    assert_eq!(lod_factor(1e9, 400.0), MIN_LOD_FACTOR);
  }

  #[test]
  fn monotonically_non_increasing() {
    let max = 1000.0;
    let mut prev = lod_factor(0.0, max);
    for i in 1..=100 {
      let next = lod_factor(i as f32 * 15.0, max);
      assert!(next <= prev, "factor increased at step {i}");
      prev = next;
    }
  }

  #[test]
  fn always_within_bounds() {
    for i in 0..200 {
      let f = lod_factor(i as f32 * 7.3, 500.0);
      assert!((MIN_LOD_FACTOR..=1.0).contains(&f));
    }
  }

  #[test]
  fn resolution_floors_at_minimum() {
    assert_eq!(effective_resolution(20, 4, 1.0), 20);
    assert_eq!(effective_resolution(20, 4, 0.25), 5);
    assert_eq!(effective_resolution(20, 4, MIN_LOD_FACTOR), 4);
    assert_eq!(effective_resolution(20, 4, 0.01), 4);
  }
}
