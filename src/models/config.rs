use serde::Deserialize;
use std::path::Path;
use value_study::{ConfigError, HexCase, RecolorPreset, Rgb};

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Value-study rendering
    #[serde(default)]
    pub study: StudySettings,

    /// Overview / loupe defaults for new viewport sessions
    #[serde(default)]
    pub viewport: ViewportSettings,

    /// Pixel sampling
    #[serde(default)]
    pub sampler: SamplerSettings,

    /// Named recolor bases, selectable by name in study requests
    #[serde(default = "default_recolor_presets")]
    pub recolor_presets: Vec<RecolorPresetConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StudySettings {
    /// Inputs larger than this on either side are downscaled first
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Capacity of the rendered-study cache (0 disables caching)
    #[serde(default = "default_cache_entries")]
    pub cache_entries: usize,
}

fn default_max_dimension() -> u32 {
    1200
}

fn default_cache_entries() -> usize {
    32
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            cache_entries: default_cache_entries(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewportSettings {
    /// Height the overview is drawn at, in display pixels
    #[serde(default = "default_overview_height")]
    pub overview_height: f64,

    /// Loupe width / height
    #[serde(default = "default_loupe_aspect")]
    pub loupe_aspect: f64,

    /// Live sessions kept before the least recently used is dropped
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_overview_height() -> f64 {
    value_study::viewport::DEFAULT_OVERVIEW_HEIGHT
}

fn default_loupe_aspect() -> f64 {
    1.0
}

fn default_max_sessions() -> usize {
    64
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            overview_height: default_overview_height(),
            loupe_aspect: default_loupe_aspect(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SamplerSettings {
    /// Default neighborhood size for pixel-grid requests
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,

    /// Largest neighborhood a pixel-grid request may ask for
    #[serde(default = "default_max_grid_size")]
    pub max_grid_size: u32,

    /// Case of hex digits in sampled colors
    #[serde(default)]
    pub hex_case: HexCaseSetting,
}

fn default_grid_size() -> u32 {
    value_study::sampler::DEFAULT_GRID_SIZE
}

fn default_max_grid_size() -> u32 {
    51
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            max_grid_size: default_max_grid_size(),
            hex_case: HexCaseSetting::default(),
        }
    }
}

/// `lower` / `upper` in YAML
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HexCaseSetting {
    #[default]
    Lower,
    Upper,
}

impl From<HexCaseSetting> for HexCase {
    fn from(setting: HexCaseSetting) -> Self {
        match setting {
            HexCaseSetting::Lower => HexCase::Lower,
            HexCaseSetting::Upper => HexCase::Upper,
        }
    }
}

/// A named recolor base as written in the config file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RecolorPresetConfig {
    pub name: String,
    /// `#rrggbb` or `#rgb`
    pub color: String,
}

fn default_recolor_presets() -> Vec<RecolorPresetConfig> {
    RecolorPreset::ALL
        .iter()
        .map(|p| RecolorPresetConfig {
            name: p.name.to_string(),
            color: p.base.to_string(),
        })
        .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            study: StudySettings::default(),
            viewport: ViewportSettings::default(),
            sampler: SamplerSettings::default(),
            recolor_presets: default_recolor_presets(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        presets = config.recolor_presets.len(),
                        max_dimension = config.study.max_dimension,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Configured presets whose colors parse, in file order
    pub fn presets(&self) -> Vec<(String, Rgb)> {
        self.recolor_presets
            .iter()
            .filter_map(|p| match p.color.parse::<Rgb>() {
                Ok(rgb) => Some((p.name.clone(), rgb)),
                Err(e) => {
                    tracing::warn!(name = %p.name, color = %p.color, %e, "Skipping invalid recolor preset");
                    None
                }
            })
            .collect()
    }

    /// Resolve a recolor request: a preset name (case-insensitive) or a hex color
    pub fn resolve_recolor(&self, value: &str) -> Result<Rgb, ConfigError> {
        let value = value.trim();
        if let Some((_, rgb)) = self
            .presets()
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
        {
            return Ok(rgb);
        }
        Ok(value.parse::<Rgb>()?)
    }

    pub fn hex_case(&self) -> HexCase {
        self.sampler.hex_case.into()
    }

    /// Grid size for a request, falling back to the configured default.
    ///
    /// Sizes above `sampler.max_grid_size` are rejected here; parity is
    /// left to the sampler.
    pub fn grid_size(&self, requested: Option<u32>) -> Result<u32, ConfigError> {
        let size = requested.unwrap_or(self.sampler.grid_size);
        let max = self.sampler.max_grid_size;
        if size > max {
            return Err(ConfigError::GridSizeTooLarge { size, max });
        }
        Ok(size)
    }
}
