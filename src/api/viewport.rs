use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use value_study::{ImageOrigin, ViewportEvent, ViewportState, ViewportSynchronizer};

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{SessionId, ViewportRegistry};

/// Request body for creating a viewport session
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateViewportRequest {
    /// Source image width in pixels
    pub width: u32,
    /// Source image height in pixels
    pub height: u32,
    /// Loupe width / height (default from config)
    #[serde(default)]
    pub loupe_aspect: Option<f64>,
    /// Overview draw height in display pixels (default from config)
    #[serde(default)]
    pub overview_height: Option<f64>,
}

/// Pointer interaction from either viewport
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewportEventRequest {
    /// Click in the overview, in overview display pixels
    ClickOverview { x: f64, y: f64 },
    /// Click or hover in the loupe, as fractions of the loupe viewport
    Crop { x: f64, y: f64 },
    HoverEnter,
    HoverLeave,
}

impl From<ViewportEventRequest> for ViewportEvent {
    fn from(event: ViewportEventRequest) -> Self {
        match event {
            ViewportEventRequest::ClickOverview { x, y } => ViewportEvent::ClickOverview { x, y },
            ViewportEventRequest::Crop { x, y } => {
                ViewportEvent::ClickOrHoverCrop { rel_x: x, rel_y: y }
            }
            ViewportEventRequest::HoverEnter => ViewportEvent::HoverEnterOverview,
            ViewportEventRequest::HoverLeave => ViewportEvent::HoverLeaveOverview,
        }
    }
}

/// How a newly displayed image relates to the current one
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageOriginRequest {
    /// A different picture; selection and crosshair start over
    NewBase,
    /// A study of the current picture; state is kept if the size matches
    Reprocessed,
}

impl From<ImageOriginRequest> for ImageOrigin {
    fn from(origin: ImageOriginRequest) -> Self {
        match origin {
            ImageOriginRequest::NewBase => ImageOrigin::NewBase,
            ImageOriginRequest::Reprocessed => ImageOrigin::Reprocessed,
        }
    }
}

/// Request body announcing a newly displayed image
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoadImageRequest {
    pub width: u32,
    pub height: u32,
    pub origin: ImageOriginRequest,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RectangleValue {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PointValue {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SizeValue {
    pub width: f64,
    pub height: f64,
}

/// Everything needed to paint the overview and the loupe
#[derive(Debug, Serialize, ToSchema)]
pub struct ViewportSnapshotResponse {
    /// Selection in source pixels
    pub selection: RectangleValue,
    /// Crosshair relative to the selection, each axis in [0, 1]
    pub crosshair: PointValue,
    /// Source pixel under the crosshair, for the pixel sampler
    pub crosshair_source: PointValue,
    /// While set, the overview is drawn without overlay and outline
    pub hovering_overview: bool,
    /// Overview draw size in display pixels
    pub overview: SizeValue,
}

impl From<&ViewportState> for ViewportSnapshotResponse {
    fn from(state: &ViewportState) -> Self {
        let snapshot = state.snapshot();
        let (source_x, source_y) = state.crosshair_source();
        let (overview_width, overview_height) = state.overview_size();
        Self {
            selection: RectangleValue {
                x: snapshot.selection.x,
                y: snapshot.selection.y,
                width: snapshot.selection.width,
                height: snapshot.selection.height,
            },
            crosshair: PointValue {
                x: snapshot.crosshair.x,
                y: snapshot.crosshair.y,
            },
            crosshair_source: PointValue {
                x: source_x,
                y: source_y,
            },
            hovering_overview: snapshot.hovering_overview,
            overview: SizeValue {
                width: overview_width,
                height: overview_height,
            },
        }
    }
}

/// A new session and its initial state
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateViewportResponse {
    pub session_id: String,
    pub snapshot: ViewportSnapshotResponse,
}

/// Start a viewport session for a freshly decoded image
///
/// The initial selection covers 15% of the image height at the loupe's
/// aspect ratio, centered, with the crosshair in the middle of the loupe.
#[utoipa::path(
    post,
    path = "/api/viewport",
    request_body = CreateViewportRequest,
    responses(
        (status = 200, description = "Session created", body = CreateViewportResponse),
        (status = 422, description = "Zero dimensions or invalid aspect ratio"),
    ),
    tag = "Viewport"
)]
pub async fn handle_create_viewport<R: ViewportRegistry>(
    State(config): State<Arc<AppConfig>>,
    State(registry): State<Arc<R>>,
    JsonExtractor(request): JsonExtractor<CreateViewportRequest>,
) -> Result<Json<CreateViewportResponse>, ApiError> {
    let aspect = request.loupe_aspect.unwrap_or(config.viewport.loupe_aspect);
    let overview_height = request
        .overview_height
        .unwrap_or(config.viewport.overview_height);

    let mut synchronizer = ViewportSynchronizer::new().overview_height(overview_height);
    synchronizer.initialize(request.width, request.height, aspect)?;

    let (id, state) = registry.create(synchronizer).await?;

    Ok(Json(CreateViewportResponse {
        session_id: id.to_string(),
        snapshot: (&state).into(),
    }))
}

/// Current state of a viewport session
#[utoipa::path(
    get,
    path = "/api/viewport/{id}",
    params(("id" = String, Path, description = "Session id from POST /api/viewport")),
    responses(
        (status = 200, description = "Current state", body = ViewportSnapshotResponse),
        (status = 404, description = "Session not found"),
    ),
    tag = "Viewport"
)]
pub async fn handle_get_viewport<R: ViewportRegistry>(
    State(registry): State<Arc<R>>,
    Path(id): Path<String>,
) -> Result<Json<ViewportSnapshotResponse>, ApiError> {
    let state = registry
        .find(&SessionId::new(id))
        .await?
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json((&state).into()))
}

/// Apply a pointer event to a viewport session
#[utoipa::path(
    post,
    path = "/api/viewport/{id}/event",
    request_body = ViewportEventRequest,
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "State after the event", body = ViewportSnapshotResponse),
        (status = 404, description = "Session not found"),
    ),
    tag = "Viewport"
)]
pub async fn handle_viewport_event<R: ViewportRegistry>(
    State(registry): State<Arc<R>>,
    Path(id): Path<String>,
    JsonExtractor(event): JsonExtractor<ViewportEventRequest>,
) -> Result<Json<ViewportSnapshotResponse>, ApiError> {
    let id = SessionId::new(id);
    tracing::trace!(session = %id, event = ?event, "Viewport event");

    let state = registry
        .apply(&id, event.into())
        .await?
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json((&state).into()))
}

/// Announce a newly displayed image
///
/// A reprocessed image of the same size keeps the selection and crosshair;
/// anything else starts the session over.
#[utoipa::path(
    post,
    path = "/api/viewport/{id}/image",
    request_body = LoadImageRequest,
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "State for the new image", body = ViewportSnapshotResponse),
        (status = 404, description = "Session not found"),
        (status = 422, description = "Zero dimensions"),
    ),
    tag = "Viewport"
)]
pub async fn handle_viewport_image<R: ViewportRegistry>(
    State(registry): State<Arc<R>>,
    Path(id): Path<String>,
    JsonExtractor(request): JsonExtractor<LoadImageRequest>,
) -> Result<Json<ViewportSnapshotResponse>, ApiError> {
    let state = registry
        .load_image(
            &SessionId::new(id),
            request.width,
            request.height,
            request.origin.into(),
        )
        .await?
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json((&state).into()))
}

/// End a viewport session
#[utoipa::path(
    delete,
    path = "/api/viewport/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session removed"),
        (status = 404, description = "Session not found"),
    ),
    tag = "Viewport"
)]
pub async fn handle_delete_viewport<R: ViewportRegistry>(
    State(registry): State<Arc<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if registry.remove(&SessionId::new(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound)
    }
}
