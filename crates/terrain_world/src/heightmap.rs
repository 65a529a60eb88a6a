//! Discrete height grids and the region sampler that fills them.
//!
//! A [`Heightmap`] is a flat row-major buffer with explicit dimensions; the
//! accessor clamps out-of-range indices to the nearest valid cell (edge
//! replication), which keeps the gradient convolution free of border special
//! cases. Row index steps world Y, column index steps world X.

use glam::Vec2;

use crate::field::NoiseField;

/// Fractal sampling parameters for multi-octave terrain.
#[derive(Clone, Copy, Debug)]
pub struct FractalParams {
  pub octaves: u32,
  pub lacunarity: f64,
  pub persistence: f64,
}

/// A grid of raw noise heights (roughly [-1, 1]) tied to its originating
/// world offset and per-cell spacing.
#[derive(Clone, Debug)]
pub struct Heightmap {
  data: Vec<f32>,
  width: u32,
  height: u32,
  /// World units per grid step.
  scale: f32,
  /// World position of cell (0, 0).
  offset: Vec2,
}

impl Heightmap {
  /// Creates a zero-filled heightmap.
  pub fn new(width: u32, height: u32, scale: f32, offset: Vec2) -> Self {
    Self {
      data: vec![0.0; (width as usize) * (height as usize)],
      width,
      height,
      scale,
      offset,
    }
  }

  /// Columns in the grid.
  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  /// Rows in the grid.
  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  /// World units per grid step.
  #[inline]
  pub fn scale(&self) -> f32 {
    self.scale
  }

  /// World position of cell (0, 0).
  #[inline]
  pub fn offset(&self) -> Vec2 {
    self.offset
  }

  /// Height at (col, row), clamping both indices to the grid bounds.
  #[inline]
  pub fn get(&self, col: i64, row: i64) -> f32 {
    let col = col.clamp(0, self.width as i64 - 1) as usize;
    let row = row.clamp(0, self.height as i64 - 1) as usize;
    self.data[row * self.width as usize + col]
  }

  /// Writes the height at (col, row). Panics if out of bounds.
  #[inline]
  pub fn set(&mut self, col: u32, row: u32, value: f32) {
    debug_assert!(col < self.width && row < self.height);
    self.data[(row as usize) * (self.width as usize) + (col as usize)] = value;
  }

  /// World position of a grid cell.
  #[inline]
  pub fn world_at(&self, col: u32, row: u32) -> Vec2 {
    self.offset + Vec2::new(col as f32 * self.scale, row as f32 * self.scale)
  }

  /// Raw row-major samples.
  pub fn as_slice(&self) -> &[f32] {
    &self.data
  }

  /// Bilinearly interpolated height at a world position, clamped to the
  /// grid's extent.
  pub fn sample_world(&self, world: Vec2) -> f32 {
    let gx = ((world.x - self.offset.x) / self.scale) as f64;
    let gy = ((world.y - self.offset.y) / self.scale) as f64;

    let col = gx.floor() as i64;
    let row = gy.floor() as i64;
    let fx = (gx - gx.floor()) as f32;
    let fy = (gy - gy.floor()) as f32;

    let h00 = self.get(col, row);
    let h10 = self.get(col + 1, row);
    let h01 = self.get(col, row + 1);
    let h11 = self.get(col + 1, row + 1);

    let top = h00 + (h10 - h00) * fx;
    let bottom = h01 + (h11 - h01) * fx;
    top + (bottom - top) * fy
  }
}

/// Fills heightmaps by querying a noise field once per grid cell.
///
/// World coordinate of cell (col, row) = `offset + (col, row) * scale`,
/// divided by the noise frequency before lookup so terrain wavelength is
/// independent of grid geometry. Sampling has no side effects; every call
/// allocates a fresh grid.
#[derive(Clone, Copy, Debug)]
pub struct HeightmapSampler {
  field: NoiseField,
  noise_frequency: f64,
  fractal: Option<FractalParams>,
}

impl HeightmapSampler {
  /// Creates a single-sample-per-cell sampler.
  pub fn new(field: NoiseField, noise_frequency: f64) -> Self {
    Self {
      field,
      noise_frequency,
      fractal: None,
    }
  }

  /// Switches the sampler to multi-octave fractal mode.
  pub fn with_fractal(mut self, params: FractalParams) -> Self {
    self.fractal = Some(params);
    self
  }

  /// The underlying noise field.
  pub fn field(&self) -> &NoiseField {
    &self.field
  }

  /// Samples a `width × height` grid anchored at `offset`.
  ///
  /// Requesting `(N+1) × (N+1)` samples for an `N × N` tile grid puts the
  /// last sample exactly on the neighboring chunk's first column, so shared
  /// edges tile bit-for-bit.
  pub fn sample_region(&self, width: u32, height: u32, scale: f32, offset: Vec2) -> Heightmap {
    let mut map = Heightmap::new(width, height, scale, offset);

    // f64 throughout so equal world coordinates hash to equal noise inputs
    // no matter which chunk computed them.
    let ox = offset.x as f64;
    let oy = offset.y as f64;
    let step = scale as f64;

    for row in 0..height {
      for col in 0..width {
        let world_x = ox + col as f64 * step;
        let world_y = oy + row as f64 * step;
        let x = world_x / self.noise_frequency;
        let y = world_y / self.noise_frequency;

        let value = match self.fractal {
          Some(f) => self.field.fractal(x, y, f.octaves, f.lacunarity, f.persistence),
          None => self.field.sample(x, y),
        };
        map.set(col, row, value as f32);
      }
    }

    map
  }
}
