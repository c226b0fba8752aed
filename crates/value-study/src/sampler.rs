//! Nearest-sample color picking.
//!
//! Coordinates are source-space floats straight from pointer math. They are
//! floored and clamped into the image, so marginally out-of-range input
//! from fast pointer movement reads the nearest border pixel instead of
//! failing.

use crate::color::{HexCase, Rgb};
use crate::error::ConfigError;
use crate::raster::Raster;

/// Default neighborhood size for loupe previews.
pub const DEFAULT_GRID_SIZE: u32 = 11;

/// A color read from one pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSample {
    /// `#rrggbb` in the requested case
    pub hex: String,
    pub rgb: Rgb,
    /// The pixel actually read, after clamping
    pub coordinates: (u32, u32),
}

/// Floor and clamp one coordinate into `0..size`.
#[inline]
fn clamp_coord(value: f64, size: u32) -> u32 {
    let max = (size - 1) as f64;
    if value.is_nan() {
        return 0;
    }
    value.floor().max(0.0).min(max) as u32
}

/// Color of the pixel containing `(x, y)`.
///
/// ```
/// use value_study::{sampler::sample_at, color::HexCase, Raster};
///
/// let raster = Raster::from_pixels(
///     2,
///     2,
///     &[[0, 0, 0, 255], [0, 0, 0, 255], [0, 0, 0, 255], [10, 20, 30, 255]],
/// )
/// .unwrap();
///
/// let sample = sample_at(&raster, 5.0, 5.0, HexCase::Lower);
/// assert_eq!(sample.rgb.to_bytes(), [10, 20, 30]);
/// assert_eq!(sample.hex, "#0a141e");
/// assert_eq!(sample.coordinates, (1, 1));
/// ```
pub fn sample_at(raster: &Raster, x: f64, y: f64, case: HexCase) -> ColorSample {
    let px = clamp_coord(x, raster.width());
    let py = clamp_coord(y, raster.height());
    let rgb = raster.rgb(px, py);

    ColorSample {
        hex: rgb.to_hex(case),
        rgb,
        coordinates: (px, py),
    }
}

/// Hex colors of the `grid_size × grid_size` square centered on `(cx, cy)`.
///
/// Rows run top to bottom. Each cell is clamped on its own, so
/// neighborhoods at edges and corners repeat the border pixels.
///
/// # Errors
///
/// [`ConfigError::InvalidGridSize`] if `grid_size` is zero or even.
pub fn sample_grid(
    raster: &Raster,
    cx: f64,
    cy: f64,
    grid_size: u32,
    case: HexCase,
) -> Result<Vec<Vec<String>>, ConfigError> {
    if grid_size == 0 || grid_size % 2 == 0 {
        return Err(ConfigError::InvalidGridSize(grid_size));
    }

    let half = (grid_size / 2) as i64;
    let grid = (-half..=half)
        .map(|dy| {
            (-half..=half)
                .map(|dx| {
                    let px = clamp_coord(cx + dx as f64, raster.width());
                    let py = clamp_coord(cy + dy as f64, raster.height());
                    raster.rgb(px, py).to_hex(case)
                })
                .collect()
        })
        .collect();

    Ok(grid)
}
