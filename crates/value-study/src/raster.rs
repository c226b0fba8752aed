//! Decoded RGBA raster.

use crate::color::Rgb;
use crate::error::{ConfigError, DecodeError};

/// An immutable grid of 8-bit RGBA samples in row-major order.
///
/// A `Raster` can only be built from a buffer that matches its dimensions,
/// so holding one means the image decoded completely. Transforms never
/// mutate a raster; they return a new one.
///
/// # Example
///
/// ```
/// use value_study::Raster;
///
/// let raster = Raster::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
/// assert_eq!(raster.pixel(1, 0), [0, 0, 255, 128]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an RGBA buffer of exactly `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage);
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(DecodeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a raster from one `[R, G, B, A]` array per pixel.
    pub fn from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> Result<Self, DecodeError> {
        Self::from_rgba(width, height, pixels.concat())
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, DecodeError> {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::from_rgba(width, height, data)
    }

    /// Wrap a buffer already known to match the dimensions.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always false; zero-sized rasters cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// RGBA sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image. Use
    /// [`sample_at`](crate::sampler::sample_at) for clamped access.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// RGB part of the sample at `(x, y)`.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b, _] = self.pixel(x, y);
        Rgb::new(r, g, b)
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster and return its RGBA bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Iterate over `[R, G, B, A]` pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Re-check the buffer against the dimensions.
    ///
    /// Transforms call this before doing any pixel work.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.len() * 4;
        if self.width == 0 || self.height == 0 || self.data.len() != expected {
            return Err(ConfigError::MalformedRaster {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}
