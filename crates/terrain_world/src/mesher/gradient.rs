//! Gradient magnitude estimation over a heightmap.
//!
//! A 3×3 Sobel kernel run once per axis; borders read through the
//! heightmap's clamped accessor, so edge cells replicate their nearest
//! interior neighbor instead of wrapping or zero-padding.

use crate::heightmap::Heightmap;

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-cell gradient magnitudes for a heightmap, same dimensions.
#[derive(Clone, Debug)]
pub struct GradientMap {
  data: Vec<f32>,
  width: u32,
  height: u32,
  max: f32,
}

impl GradientMap {
  /// Magnitude at (col, row). Panics if out of bounds.
  #[inline]
  pub fn get(&self, col: u32, row: u32) -> f32 {
    self.data[(row as usize) * (self.width as usize) + (col as usize)]
  }

  /// Largest magnitude in the map; zero for perfectly flat terrain.
  #[inline]
  pub fn max(&self) -> f32 {
    self.max
  }

  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }
}

/// Computes the Sobel gradient magnitude of every heightmap cell.
pub fn sobel_magnitude(map: &Heightmap) -> GradientMap {
  let width = map.width();
  let height = map.height();
  let mut data = Vec::with_capacity((width as usize) * (height as usize));
  let mut max = 0.0f32;

  for row in 0..height {
    for col in 0..width {
      let mut gx = 0.0;
      let mut gy = 0.0;
      for ky in 0..3i64 {
        for kx in 0..3i64 {
          let sample = map.get(col as i64 + kx - 1, row as i64 + ky - 1);
          gx += SOBEL_X[ky as usize][kx as usize] * sample;
          gy += SOBEL_Y[ky as usize][kx as usize] * sample;
        }
      }
      let magnitude = gx.hypot(gy);
      max = max.max(magnitude);
      data.push(magnitude);
    }
  }

  GradientMap {
    data,
    width,
    height,
    max,
  }
}
