use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use value_study::HexCase;

use crate::models::AppConfig;

/// A named recolor base
#[derive(Debug, Serialize, ToSchema)]
pub struct RecolorPresetResponse {
    /// Name accepted as `recolor` in study requests
    pub name: String,
    /// `#rrggbb`
    pub color: String,
}

/// Available recolor presets
#[derive(Debug, Serialize, ToSchema)]
pub struct RecolorPresetsResponse {
    pub presets: Vec<RecolorPresetResponse>,
}

/// List recolor presets
///
/// Presets come from the configuration file; entries with unparsable
/// colors are left out.
#[utoipa::path(
    get,
    path = "/api/recolor-presets",
    responses(
        (status = 200, description = "Configured presets", body = RecolorPresetsResponse),
    ),
    tag = "Value Study"
)]
pub async fn handle_recolor_presets(
    State(config): State<Arc<AppConfig>>,
) -> Json<RecolorPresetsResponse> {
    let presets = config
        .presets()
        .into_iter()
        .map(|(name, rgb)| RecolorPresetResponse {
            name,
            color: rgb.to_hex(HexCase::Lower),
        })
        .collect();

    Json(RecolorPresetsResponse { presets })
}
