//! Server integration tests that test the actual server behavior.
//!
//! Most of these start a real TCP server and talk to it over a socket;
//! the rest check configuration loading end to end.

mod common;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use common::{assert_ok, TestApp};
use hueloupe::models::AppConfig;
use hueloupe::server::{build_router, create_app_state};

/// Start a test server on an available port and return the port number.
async fn start_test_server(config: AppConfig) -> u16 {
    let state = create_app_state(config).expect("Failed to create app state");
    let app = build_router(state);

    // Bind to port 0 to get an available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    port
}

/// Send one request over a fresh connection and return the raw response
async fn raw_request(port: u16, request: &str) -> String {
    let mut stream = TcpStream::connect(format!("127.0.0.1:{}", port))
        .await
        .expect("Failed to connect");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("Failed to write request");

    let mut response = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = tokio::time::timeout(
            tokio::time::Duration::from_millis(500),
            stream.read(&mut buf),
        )
        .await
        .expect("Timed out reading response")
        .expect("Failed to read response");
        if n == 0 {
            break;
        }
        response.extend_from_slice(&buf[..n]);
        if response.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    String::from_utf8_lossy(&response).to_string()
}

#[tokio::test]
async fn test_health_over_tcp() {
    let port = start_test_server(AppConfig::default()).await;

    let response = raw_request(
        port,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(
        response.contains("HTTP/1.1 200"),
        "Should get 200 OK response, got: {response}"
    );
    assert!(
        response.to_lowercase().contains("cache-control: no-store"),
        "Response should have Cache-Control: no-store, got: {response}"
    );
}

#[tokio::test]
async fn test_viewport_session_over_tcp() {
    let port = start_test_server(AppConfig::default()).await;

    let body = json!({ "width": 200, "height": 100 }).to_string();
    let request = format!(
        "POST /api/viewport HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let response = raw_request(port, &request).await;

    assert!(
        response.contains("HTTP/1.1 200"),
        "Should get 200 OK response, got: {response}"
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_default_recolor_presets() {
    let app = TestApp::new();

    let response = app.get("/api/recolor-presets").await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(
        json["presets"],
        json!([
            { "name": "Magenta", "color": "#e401b1" },
            { "name": "Sepia", "color": "#8b4513" },
        ])
    );
}

#[tokio::test]
async fn test_config_file_drives_presets_and_limits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hueloupe.yaml");
    std::fs::write(
        &path,
        r##"
study:
  max_dimension: 8
sampler:
  grid_size: 5
recolor_presets:
  - name: Ultramarine
    color: "#120A8F"
  - name: Broken
    color: "#12"
"##,
    )
    .unwrap();

    let app = TestApp::with_config(AppConfig::load(Some(&path)));

    let json: Value = app.get("/api/recolor-presets").await.json();
    assert_eq!(
        json["presets"],
        json!([{ "name": "Ultramarine", "color": "#120a8f" }])
    );

    // The configured preset works by name
    let image = common::fixtures::png_base64(&common::fixtures::gradient(16, 4));
    let response = app
        .post_json(
            "/api/value-study",
            &json!({ "image_data": image, "recolor": "ultramarine" }),
        )
        .await;
    common::assert_png(&response);
    assert_eq!(response.header("x-study-width"), Some("8"));
    assert_eq!(response.header("x-study-height"), Some("2"));

    // And the built-in ones are gone
    let response = app
        .post_json(
            "/api/value-study",
            &json!({ "image_data": image, "recolor": "sepia" }),
        )
        .await;
    common::assert_api_error(&response, axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .post_json(
            "/api/pixel-grid?x=1&y=1",
            &json!({ "image_data": image }),
        )
        .await;
    let json: Value = response.json();
    assert_eq!(json["size"], 5);
}

#[tokio::test]
async fn test_unparsable_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "study: [this is not a mapping").unwrap();

    let app = TestApp::with_config(AppConfig::load(Some(&path)));

    let json: Value = app.get("/api/recolor-presets").await.json();
    assert_eq!(json["presets"].as_array().unwrap().len(), 2);
}

#[test]
fn test_invalid_loupe_aspect_rejected_at_startup() {
    let mut config = AppConfig::default();
    config.viewport.loupe_aspect = 0.0;

    assert!(create_app_state(config).is_err());
}

#[test]
fn test_default_grid_above_limit_rejected_at_startup() {
    let mut config = AppConfig::default();
    config.sampler.grid_size = 61;

    assert!(create_app_state(config).is_err());
}
