//! Error types for the value-study engine.
//!
//! Coordinates are never an error source: every coordinate-consuming
//! function clamps into the image instead. What remains are rasters that
//! could not be produced ([`DecodeError`]) and configurations that are
//! rejected before any pixel work happens ([`ConfigError`]).

use std::fmt;

use crate::color::ParseColorError;

/// A raster could not be produced from the given input.
///
/// Fatal for every dependent operation until a new input is supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Width or height is zero
    EmptyImage,
    /// RGBA buffer length does not match `width * height * 4`
    BufferSize {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },
    /// The encoded payload could not be decoded (format, base64, corruption)
    Format(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::EmptyImage => write!(f, "image has zero width or height"),
            DecodeError::BufferSize { expected, actual } => write!(
                f,
                "RGBA buffer has {} bytes, expected {}",
                actual, expected
            ),
            DecodeError::Format(msg) => write!(f, "could not decode image: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}

/// A configuration value was rejected before any pixel work.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Posterization steps outside `2..=10`
    InvalidSteps(i64),
    /// Sampling grid size is zero or even
    InvalidGridSize(u32),
    /// Sampling grid size exceeds the caller's limit
    GridSizeTooLarge {
        /// Requested size
        size: u32,
        /// Largest size allowed
        max: u32,
    },
    /// Loupe aspect ratio is not a positive finite number
    InvalidAspect(f64),
    /// Image dimensions given to the viewport are zero
    InvalidDimensions {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
    /// Raster buffer does not agree with its dimensions
    MalformedRaster {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },
    /// Recolor base color could not be parsed
    InvalidColor(ParseColorError),
}

impl From<ParseColorError> for ConfigError {
    fn from(err: ParseColorError) -> Self {
        ConfigError::InvalidColor(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSteps(steps) => {
                write!(f, "steps must be between 2 and 10, got {}", steps)
            }
            ConfigError::InvalidGridSize(size) => {
                write!(f, "grid size must be odd and positive, got {}", size)
            }
            ConfigError::GridSizeTooLarge { size, max } => {
                write!(f, "grid size must be at most {}, got {}", max, size)
            }
            ConfigError::InvalidAspect(aspect) => {
                write!(f, "loupe aspect ratio must be positive, got {}", aspect)
            }
            ConfigError::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions {}x{}", width, height)
            }
            ConfigError::MalformedRaster { expected, actual } => write!(
                f,
                "malformed raster: {} bytes for {} expected",
                actual, expected
            ),
            ConfigError::InvalidColor(err) => write!(f, "invalid recolor base: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidColor(err) => Some(err),
            _ => None,
        }
    }
}
