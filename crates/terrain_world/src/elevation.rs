//! Elevation-to-color mapping.
//!
//! A fixed ordered gradient from low/dark to high/white; triangle and vertex
//! colors come from linear interpolation between the two bracketing stops.

use palette::{LinSrgb, Mix};

/// An ordered list of color stops spanning normalized elevation [0, 1].
#[derive(Clone, Debug)]
pub struct ElevationPalette {
  stops: Vec<LinSrgb>,
}

impl ElevationPalette {
  /// Builds a palette from `[r, g, b]` stops in linear RGB.
  ///
  /// Interpolation needs at least 2 stops; smaller palettes fall back to a
  /// constant color in [`sample`](Self::sample).
  pub fn from_stops(stops: &[[f32; 3]]) -> Self {
    Self {
      stops: stops
        .iter()
        .map(|&[r, g, b]| LinSrgb::new(r, g, b))
        .collect(),
    }
  }

  /// Number of stops.
  pub fn len(&self) -> usize {
    self.stops.len()
  }

  /// True when the palette has no stops.
  pub fn is_empty(&self) -> bool {
    self.stops.is_empty()
  }

  /// Color for a normalized elevation, clamped to [0, 1], as RGBA.
  ///
  /// Degenerate palettes still answer: no stops gives opaque black, a
  /// single stop is returned for every elevation.
  pub fn sample(&self, elevation: f32) -> [f32; 4] {
    match self.stops.as_slice() {
      [] => return [0.0, 0.0, 0.0, 1.0],
      [only] => return [only.red, only.green, only.blue, 1.0],
      _ => {}
    }

    let t = elevation.clamp(0.0, 1.0);
    let segments = self.stops.len() - 1;
    let scaled = t * segments as f32;
    let index = (scaled.floor() as usize).min(segments - 1);
    let frac = scaled - index as f32;

    let color = self.stops[index].mix(self.stops[index + 1], frac);
    [color.red, color.green, color.blue, 1.0]
  }
}
