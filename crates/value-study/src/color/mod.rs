//! Color types and conversions
//!
//! - [`Rgb`]: 8-bit sRGB triple with hex formatting and parsing
//! - [`rgb_to_luminance`] / [`posterize_luminance`]: relative luminance on a
//!   0..=255 scale, and its quantization to N steps
//! - [`rgb_to_percentages`] / [`rgb_to_cmyk`]: breakdowns shown next to a
//!   sampled color
//! - [`color_spaces`]: the same color in HSL, HSV, HWB, CIELAB, LCH, OKLab,
//!   OKLCH and XYZ
//!
//! # Example
//!
//! ```
//! use value_study::color::{rgb_to_luminance, Rgb};
//!
//! let c: Rgb = "#808080".parse().unwrap();
//! assert_eq!(rgb_to_luminance(c.r, c.g, c.b), 55);
//! ```

mod breakdown;
mod luminance;
mod lut;
mod rgb;
mod spaces;

pub use breakdown::{rgb_to_cmyk, rgb_to_percentages, Cmyk, RgbPercentages};
pub use luminance::{posterize_luminance, rgb_to_luminance};
pub use lut::srgb8_to_linear;
pub use rgb::{HexCase, ParseColorError, Rgb};
pub use spaces::{color_spaces, ColorSpaceValue, ColorSpaces};
