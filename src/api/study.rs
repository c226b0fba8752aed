use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json as JsonExtractor,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use value_study::study::MAX_STEPS;
use value_study::{ConfigError, Recolor, ValueStudyConfig};

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::decoder::decode_base64;
use crate::services::StudyService;

/// Request body for the value-study endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValueStudyRequest {
    /// Base64 image, or a `data:image/...;base64,` URL
    pub image_data: String,
    /// Number of gray levels (2-10, default 10 = no posterization)
    #[serde(default)]
    pub steps: Option<i64>,
    /// Darken detected edges
    #[serde(default)]
    pub edge_detection: Option<bool>,
    /// Hex color (`#e401b1`) or preset name (`Sepia`) to tint with
    #[serde(default)]
    pub recolor: Option<String>,
}

impl ValueStudyRequest {
    /// Study settings for this request, validated
    pub fn to_config(&self, app_config: &AppConfig) -> Result<ValueStudyConfig, ApiError> {
        let recolor = match self.recolor.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => {
                Some(Recolor::new(app_config.resolve_recolor(value)?))
            }
            _ => None,
        };

        let steps = match self.steps {
            Some(steps) => u8::try_from(steps).map_err(|_| ConfigError::InvalidSteps(steps))?,
            None => MAX_STEPS,
        };

        let config = ValueStudyConfig::new()
            .steps(steps)
            .edge_detection(self.edge_detection.unwrap_or(false))
            .recolor(recolor);
        config.validate()?;
        Ok(config)
    }
}

/// Render a value study of an image
///
/// Converts the image to luminance, optionally posterizes it, darkens edges,
/// and tints the result. Images larger than the configured maximum dimension
/// are downscaled first.
#[utoipa::path(
    post,
    path = "/api/value-study",
    request_body = ValueStudyRequest,
    responses(
        (status = 200, description = "PNG value study", content_type = "image/png"),
        (status = 400, description = "Image data missing or undecodable"),
        (status = 422, description = "Invalid steps or recolor value"),
    ),
    tag = "Value Study"
)]
pub async fn handle_value_study(
    State(config): State<Arc<AppConfig>>,
    State(studies): State<Arc<StudyService>>,
    JsonExtractor(request): JsonExtractor<ValueStudyRequest>,
) -> Result<Response, ApiError> {
    let study_config = request.to_config(&config)?;
    let image_bytes = decode_base64(&request.image_data)?;

    tracing::debug!(
        payload_bytes = image_bytes.len(),
        steps = study_config.steps,
        edges = study_config.edge_detection,
        "Value study requested"
    );

    let rendered = studies.render(image_bytes, study_config).await?;
    let study = rendered.study;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, study.png_bytes.len().to_string()),
            (header::HeaderName::from_static("x-study-width"), study.width.to_string()),
            (header::HeaderName::from_static("x-study-height"), study.height.to_string()),
            (
                header::HeaderName::from_static("x-cache"),
                if rendered.cached { "HIT" } else { "MISS" }.to_string(),
            ),
        ],
        Bytes::from((*study.png_bytes).clone()),
    )
        .into_response())
}
