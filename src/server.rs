//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{Path, Query, State},
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Json as JsonExtractor, Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::api::pixel::{GridQuery, PixelQuery, SampleRequest};
use crate::api::viewport::{CreateViewportRequest, LoadImageRequest, ViewportEventRequest};
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{InMemoryViewportRegistry, StudyService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub studies: Arc<StudyService>,
    pub viewports: Arc<InMemoryViewportRegistry>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    if !config.viewport.loupe_aspect.is_finite() || config.viewport.loupe_aspect <= 0.0 {
        anyhow::bail!(
            "viewport.loupe_aspect must be a positive number, got {}",
            config.viewport.loupe_aspect
        );
    }
    if config.sampler.grid_size > config.sampler.max_grid_size {
        anyhow::bail!(
            "sampler.grid_size ({}) exceeds sampler.max_grid_size ({})",
            config.sampler.grid_size,
            config.sampler.max_grid_size
        );
    }

    let studies = Arc::new(StudyService::new(
        config.study.max_dimension,
        config.study.cache_entries,
    ));
    let viewports = Arc::new(InMemoryViewportRegistry::new(config.viewport.max_sessions));

    tracing::debug!(
        max_dimension = config.study.max_dimension,
        cache_entries = config.study.cache_entries,
        max_sessions = config.viewport.max_sessions,
        "Application state created"
    );

    Ok(AppState {
        config: Arc::new(config),
        studies,
        viewports,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// Every response carries `Cache-Control: no-store`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Value study
        .route("/api/value-study", post(handle_value_study))
        .route("/api/recolor-presets", get(handle_recolor_presets))
        // Sampling
        .route("/api/pixel-color", post(handle_pixel_color))
        .route("/api/pixel-grid", post(handle_pixel_grid))
        // Viewport sessions
        .route("/api/viewport", post(handle_create_viewport))
        .route(
            "/api/viewport/:id",
            get(handle_get_viewport).delete(handle_delete_viewport),
        )
        .route("/api/viewport/:id/event", post(handle_viewport_event))
        .route("/api/viewport/:id/image", post(handle_viewport_image))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_value_study(
    State(state): State<AppState>,
    body: JsonExtractor<api::ValueStudyRequest>,
) -> Result<Response, ApiError> {
    api::handle_value_study(State(state.config), State(state.studies), body).await
}

async fn handle_recolor_presets(State(state): State<AppState>) -> impl IntoResponse {
    api::handle_recolor_presets(State(state.config)).await
}

async fn handle_pixel_color(
    State(state): State<AppState>,
    query: Query<PixelQuery>,
    body: JsonExtractor<SampleRequest>,
) -> Result<Json<api::PixelColorResponse>, ApiError> {
    api::handle_pixel_color(State(state.config), query, body).await
}

async fn handle_pixel_grid(
    State(state): State<AppState>,
    query: Query<GridQuery>,
    body: JsonExtractor<SampleRequest>,
) -> Result<Json<api::PixelGridResponse>, ApiError> {
    api::handle_pixel_grid(State(state.config), query, body).await
}

async fn handle_create_viewport(
    State(state): State<AppState>,
    body: JsonExtractor<CreateViewportRequest>,
) -> Result<Json<api::CreateViewportResponse>, ApiError> {
    api::handle_create_viewport(State(state.config), State(state.viewports), body).await
}

async fn handle_get_viewport(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<api::ViewportSnapshotResponse>, ApiError> {
    api::handle_get_viewport(State(state.viewports), path).await
}

async fn handle_viewport_event(
    State(state): State<AppState>,
    path: Path<String>,
    body: JsonExtractor<ViewportEventRequest>,
) -> Result<Json<api::ViewportSnapshotResponse>, ApiError> {
    api::handle_viewport_event(State(state.viewports), path, body).await
}

async fn handle_viewport_image(
    State(state): State<AppState>,
    path: Path<String>,
    body: JsonExtractor<LoadImageRequest>,
) -> Result<Json<api::ViewportSnapshotResponse>, ApiError> {
    api::handle_viewport_image(State(state.viewports), path, body).await
}

async fn handle_delete_viewport(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<StatusCode, ApiError> {
    api::handle_delete_viewport(State(state.viewports), path).await
}
