//! Final per-pixel coloring and edge darkening.

use super::config::Recolor;
use crate::color::Rgb;

/// Strongest darkening applied to recolored pixels at full edge strength.
const RECOLOR_MAX_DARKENING: f64 = 0.7;
/// Floor that grayscale edges blend toward.
const GRAYSCALE_EDGE_FLOOR: f64 = 45.0;
/// Share of the pixel's own value kept in the grayscale edge target.
const GRAYSCALE_EDGE_RATIO: f64 = 0.3;

/// Map a luminance value onto the recolor ramp.
///
/// Luminance 0 is the base color, 255 is white, each channel interpolated
/// linearly and rounded. The ramp is monotonic in `luminance`.
///
/// ```
/// use value_study::color::Rgb;
/// use value_study::study::{recolor_luminance, RecolorPreset};
///
/// let sepia = RecolorPreset::SEPIA.recolor();
/// assert_eq!(recolor_luminance(0, &sepia), Rgb::new(139, 69, 19));
/// assert_eq!(recolor_luminance(255, &sepia), Rgb::WHITE);
/// ```
pub fn recolor_luminance(luminance: u8, recolor: &Recolor) -> Rgb {
    let t = luminance as f64 / 255.0;
    let ramp = |base: u8| {
        let base = base as f64;
        (base + (255.0 - base) * t).round().clamp(0.0, 255.0) as u8
    };
    let Rgb { r, g, b } = recolor.base;
    Rgb::new(ramp(r), ramp(g), ramp(b))
}

/// Multiplicative darkening, which keeps the channel ratios of a recolor.
#[inline]
fn darken_recolored(channel: u8, opacity: f64) -> u8 {
    let factor = 1.0 - opacity * RECOLOR_MAX_DARKENING;
    (channel as f64 * factor).round().clamp(0.0, 255.0) as u8
}

/// Blend a gray value toward `max(45, 0.3 * value)`.
///
/// Values darker than the floor are pulled up toward it, so edges on black
/// read as a dark gray outline.
#[inline]
fn darken_gray(value: u8, opacity: f64) -> u8 {
    let v = value as f64;
    let target = GRAYSCALE_EDGE_FLOOR.max(v * GRAYSCALE_EDGE_RATIO);
    (v * (1.0 - opacity) + target * opacity)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Output color for one pixel.
///
/// `edge` is the pass-2 strength, or `None` when edge detection is off.
pub fn composite_pixel(luminance: u8, edge: Option<u8>, recolor: Option<&Recolor>) -> Rgb {
    match (recolor, edge) {
        (Some(recolor), None) => recolor_luminance(luminance, recolor),
        (Some(recolor), Some(edge)) => {
            let opacity = edge as f64 / 255.0;
            let Rgb { r, g, b } = recolor_luminance(luminance, recolor);
            Rgb::new(
                darken_recolored(r, opacity),
                darken_recolored(g, opacity),
                darken_recolored(b, opacity),
            )
        }
        (None, None) => Rgb::new(luminance, luminance, luminance),
        (None, Some(edge)) => {
            let gray = darken_gray(luminance, edge as f64 / 255.0);
            Rgb::new(gray, gray, gray)
        }
    }
}
