pub mod config;

pub use config::{
    AppConfig, HexCaseSetting, RecolorPresetConfig, SamplerSettings, StudySettings,
    ViewportSettings,
};
