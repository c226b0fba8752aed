//! Value-study configuration.

use crate::color::Rgb;
use crate::error::ConfigError;

/// Fewest posterization steps allowed.
pub const MIN_STEPS: u8 = 2;
/// Most steps; at this value luminance is left continuous.
pub const MAX_STEPS: u8 = 10;

/// Monochrome re-coloring: luminance 0 maps to `base`, 255 to white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recolor {
    pub base: Rgb,
}

impl Recolor {
    pub const fn new(base: Rgb) -> Self {
        Self { base }
    }
}

/// A named recolor base, as offered in the study controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecolorPreset {
    pub name: &'static str,
    pub base: Rgb,
}

impl RecolorPreset {
    pub const MAGENTA: RecolorPreset = RecolorPreset {
        name: "Magenta",
        base: Rgb::new(228, 1, 177),
    };

    pub const SEPIA: RecolorPreset = RecolorPreset {
        name: "Sepia",
        base: Rgb::new(139, 69, 19),
    };

    /// Built-in presets, default first.
    pub const ALL: [RecolorPreset; 2] = [Self::MAGENTA, Self::SEPIA];

    /// Case-insensitive lookup among the built-in presets.
    pub fn find(name: &str) -> Option<RecolorPreset> {
        Self::ALL
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn recolor(&self) -> Recolor {
        Recolor::new(self.base)
    }
}

/// Everything that determines a value study's output.
///
/// # Defaults
///
/// - `steps`: 10 (continuous luminance, no posterization)
/// - `edge_detection`: off
/// - `recolor`: none (grayscale)
///
/// # Example
///
/// ```
/// use value_study::study::{RecolorPreset, ValueStudyConfig};
///
/// let config = ValueStudyConfig::new()
///     .steps(3)
///     .edge_detection(true)
///     .recolor(Some(RecolorPreset::SEPIA.recolor()));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueStudyConfig {
    /// Number of luminance levels, `2..=10`; below 10 posterizes.
    pub steps: u8,
    /// Darken along Laplacian edges of the luminance image.
    pub edge_detection: bool,
    /// Optional monochrome re-coloring.
    pub recolor: Option<Recolor>,
}

impl Default for ValueStudyConfig {
    fn default() -> Self {
        Self {
            steps: MAX_STEPS,
            edge_detection: false,
            recolor: None,
        }
    }
}

impl ValueStudyConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn steps(mut self, steps: u8) -> Self {
        self.steps = steps;
        self
    }

    #[inline]
    pub fn edge_detection(mut self, enabled: bool) -> Self {
        self.edge_detection = enabled;
        self
    }

    #[inline]
    pub fn recolor(mut self, recolor: Option<Recolor>) -> Self {
        self.recolor = recolor;
        self
    }

    /// Whether pass 1 quantizes luminance.
    #[inline]
    pub fn posterizes(&self) -> bool {
        self.steps < MAX_STEPS
    }

    /// Reject out-of-range settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_STEPS..=MAX_STEPS).contains(&self.steps) {
            return Err(ConfigError::InvalidSteps(self.steps.into()));
        }
        Ok(())
    }
}
