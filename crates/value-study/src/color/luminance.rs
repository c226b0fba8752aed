//! Relative luminance and posterization
//!
//! Luminance is computed the WCAG way: gamma-decode each channel, weight
//! with the ITU-R BT.709 primaries, and rescale to 0..=255.

use super::lut::srgb8_to_linear;

const WEIGHT_R: f64 = 0.2126;
const WEIGHT_G: f64 = 0.7152;
const WEIGHT_B: f64 = 0.0722;

/// Relative luminance of an 8-bit sRGB color on a 0..=255 scale.
///
/// ```
/// use value_study::color::rgb_to_luminance;
///
/// assert_eq!(rgb_to_luminance(255, 255, 255), 255);
/// assert_eq!(rgb_to_luminance(0, 0, 0), 0);
/// ```
#[inline]
pub fn rgb_to_luminance(r: u8, g: u8, b: u8) -> u8 {
    let luminance = WEIGHT_R * srgb8_to_linear(r)
        + WEIGHT_G * srgb8_to_linear(g)
        + WEIGHT_B * srgb8_to_linear(b);
    (luminance * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Snap a luminance value to the nearest of `steps` evenly spaced levels.
///
/// Levels are `round(k * 255 / (steps - 1))` for `k in 0..steps`, so both
/// 0 and 255 are always reachable. `steps < 2` returns the input unchanged.
///
/// ```
/// use value_study::color::posterize_luminance;
///
/// assert_eq!(posterize_luminance(130, 2), 255);
/// assert_eq!(posterize_luminance(100, 3), 128);
/// ```
#[inline]
pub fn posterize_luminance(luminance: u8, steps: u8) -> u8 {
    if steps < 2 {
        return luminance;
    }

    let step_size = 255.0 / (steps - 1) as f64;
    let step = (luminance as f64 / step_size).round();
    (step * step_size).round().clamp(0.0, 255.0) as u8
}
