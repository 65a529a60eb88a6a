//! Seeded 2D gradient noise field.
//!
//! One [`NoiseField`] value is owned by the terrain world and shared by every
//! chunk generation, so neighboring chunks querying the same world coordinate
//! always read the same height. Same seed, same coordinates, same output —
//! there is no hidden state and no process-wide instance.

use noise::{NoiseFn, Perlin};

/// Deterministic gradient noise over continuous 2D world coordinates.
#[derive(Clone, Copy, Debug)]
pub struct NoiseField {
  perlin: Perlin,
  seed: u32,
}

impl NoiseField {
  /// Creates a field fixed to the given seed.
  pub fn new(seed: u32) -> Self {
    Self {
      perlin: Perlin::new(seed),
      seed,
    }
  }

  /// The seed this field was constructed with.
  pub fn seed(&self) -> u32 {
    self.seed
  }

  /// Samples the field at a continuous coordinate.
  ///
  /// Pure, smooth, and bounded to roughly [-1, 1]. Safe to call from any
  /// thread in any order.
  pub fn sample(&self, x: f64, y: f64) -> f64 {
    self.perlin.get([x, y])
  }

  /// Sums `octaves` samples at geometrically increasing frequency and
  /// decreasing amplitude, normalized by the accumulated amplitude so the
  /// output range stays bounded regardless of octave count.
  pub fn fractal(&self, x: f64, y: f64, octaves: u32, lacunarity: f64, persistence: f64) -> f64 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_amplitude = 0.0;

    for _ in 0..octaves {
      total += self.sample(x * frequency, y * frequency) * amplitude;
      max_amplitude += amplitude;
      frequency *= lacunarity;
      amplitude *= persistence;
    }

    total / max_amplitude
  }
}
