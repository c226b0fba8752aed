//! A sampled color expressed in the common CSS color spaces.
//!
//! Conversions come from the `palette` crate. CIELAB, LCH and XYZ use the
//! D65 white point, the same one sRGB is defined against.

use palette::white_point::D65;
use palette::{encoding, FromColor, Hsl, Hsv, Hwb, Lab, Lch, Oklab, Oklch, Srgb, Xyz};

use super::Rgb;

/// One color space reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpaceValue {
    /// Raw components. Hues are degrees in `[0, 360)`; HSL, HSV and HWB
    /// percentages are fractions in `[0, 1]`.
    pub values: [f64; 3],
    /// CSS-like notation, e.g. `hsl(0, 100%, 50%)`
    pub formatted: String,
}

/// The color-space readout shown next to a sampled pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpaces {
    pub hsl: ColorSpaceValue,
    pub hsv: ColorSpaceValue,
    pub hwb: ColorSpaceValue,
    pub lab: ColorSpaceValue,
    pub lch: ColorSpaceValue,
    pub oklab: ColorSpaceValue,
    pub oklch: ColorSpaceValue,
    pub xyz: ColorSpaceValue,
}

/// Hue plus two percentages, rounded to whole numbers.
fn cylindrical(name: &str, separator: &str, values: [f64; 3]) -> ColorSpaceValue {
    let [h, a, b] = values;
    ColorSpaceValue {
        values,
        formatted: format!(
            "{name}({}{separator}{}%{separator}{}%)",
            h.round(),
            (a * 100.0).round(),
            (b * 100.0).round()
        ),
    }
}

fn fixed(name: &str, precision: usize, values: [f64; 3]) -> ColorSpaceValue {
    let [a, b, c] = values;
    ColorSpaceValue {
        values,
        formatted: format!("{name}({a:.precision$}, {b:.precision$}, {c:.precision$})"),
    }
}

/// Convert an 8-bit sRGB color to every readout space.
///
/// ```
/// use value_study::color::{color_spaces, Rgb};
///
/// let spaces = color_spaces(Rgb::new(255, 0, 0));
/// assert_eq!(spaces.hsl.formatted, "hsl(0, 100%, 50%)");
/// assert_eq!(spaces.hwb.formatted, "hwb(0 0% 0%)");
/// ```
pub fn color_spaces(rgb: Rgb) -> ColorSpaces {
    let srgb: Srgb<f64> = Srgb::new(rgb.r, rgb.g, rgb.b).into_format();

    let hsl: Hsl<encoding::Srgb, f64> = Hsl::from_color(srgb);
    let hsv: Hsv<encoding::Srgb, f64> = Hsv::from_color(srgb);
    let hwb: Hwb<encoding::Srgb, f64> = Hwb::from_color(srgb);
    let lab: Lab<D65, f64> = Lab::from_color(srgb);
    let lch: Lch<D65, f64> = Lch::from_color(lab);
    let oklab: Oklab<f64> = Oklab::from_color(srgb);
    let oklch: Oklch<f64> = Oklch::from_color(oklab);
    let xyz: Xyz<D65, f64> = Xyz::from_color(srgb);

    ColorSpaces {
        hsl: cylindrical(
            "hsl",
            ", ",
            [hsl.hue.into_positive_degrees(), hsl.saturation, hsl.lightness],
        ),
        hsv: cylindrical(
            "hsv",
            ", ",
            [hsv.hue.into_positive_degrees(), hsv.saturation, hsv.value],
        ),
        hwb: cylindrical(
            "hwb",
            " ",
            [hwb.hue.into_positive_degrees(), hwb.whiteness, hwb.blackness],
        ),
        lab: fixed("lab", 1, [lab.l, lab.a, lab.b]),
        lch: fixed("lch", 1, [lch.l, lch.chroma, lch.hue.into_positive_degrees()]),
        oklab: fixed("oklab", 3, [oklab.l, oklab.a, oklab.b]),
        oklch: fixed(
            "oklch",
            3,
            [oklch.l, oklch.chroma, oklch.hue.into_positive_degrees()],
        ),
        xyz: fixed("xyz", 3, [xyz.x, xyz.y, xyz.z]),
    }
}
