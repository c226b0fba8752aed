//! Gamma lookup table access
//!
//! The table is generated at compile time by build.rs; one exact f64 entry
//! per 8-bit channel value, so no interpolation is needed.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Linear-light value of an 8-bit sRGB channel.
#[inline]
pub fn srgb8_to_linear(channel: u8) -> f64 {
    SRGB8_TO_LINEAR[channel as usize]
}
