//! Channel breakdowns shown next to a sampled color.

/// RGB channels as whole percentages of full intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbPercentages {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Naive (device-independent) CMYK, whole percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

#[inline]
fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn rgb_to_percentages(r: u8, g: u8, b: u8) -> RgbPercentages {
    RgbPercentages {
        r: percent(r as f64 / 255.0),
        g: percent(g as f64 / 255.0),
        b: percent(b as f64 / 255.0),
    }
}

/// Convert to CMYK with `K = 1 - max(R, G, B)`.
///
/// Pure black is reported as `K = 100` with zero C, M, Y.
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> Cmyk {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return Cmyk {
            c: 0,
            m: 0,
            y: 0,
            k: 100,
        };
    }

    Cmyk {
        c: percent((1.0 - r - k) / (1.0 - k)),
        m: percent((1.0 - g - k) / (1.0 - k)),
        y: percent((1.0 - b - k) / (1.0 - k)),
        k: percent(k),
    }
}
