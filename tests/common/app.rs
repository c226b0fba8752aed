//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use hueloupe::models::AppConfig;
use hueloupe::server::{build_router, create_app_state, AppState};
use hueloupe::services::{InMemoryViewportRegistry, StudyService};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub studies: Arc<StudyService>,
    pub viewports: Arc<InMemoryViewportRegistry>,
}

impl TestApp {
    /// Create a new test application with the default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        // Create application state using shared server module
        let state = create_app_state(config).expect("Failed to create app state");

        // Keep references for test assertions
        let studies = state.studies.clone();
        let viewports = state.viewports.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            studies,
            viewports,
        }
    }

    /// Create application state for custom router configuration
    pub fn create_state() -> AppState {
        create_app_state(AppConfig::default()).expect("Failed to create app state")
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a DELETE request to the given path
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a JSON body
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.post_raw(path, &body.to_string()).await
    }

    /// Make a POST request with a raw (possibly malformed) JSON body
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a viewport session and return (session_id, snapshot)
    pub async fn create_viewport(&self, width: u32, height: u32) -> (String, serde_json::Value) {
        let body = serde_json::json!({ "width": width, "height": height });
        let response = self.post_json("/api/viewport", &body).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());

        let json: serde_json::Value = response.json();
        let id = json["session_id"].as_str().unwrap().to_string();
        (id, json["snapshot"].clone())
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
