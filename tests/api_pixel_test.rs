//! Tests for the /api/pixel-color and /api/pixel-grid endpoints.

mod common;

use axum::http::StatusCode;
use common::fixtures::{png_data_url, quadrants, sample_body};
use common::{assert_api_error, assert_ok, assert_status, TestApp};
use hueloupe::models::{AppConfig, HexCaseSetting};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_pixel_color_floors_coordinates() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/pixel-color?x=6.7&y=1.2", &sample_body(&quadrants(8)))
        .await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["hex"], "#00ff00");
    assert_eq!(json["rgb"], json!({ "r": 0, "g": 255, "b": 0 }));
    assert_eq!(json["coordinates"], json!({ "x": 6, "y": 1 }));
    assert_eq!(json["percentages"], json!({ "r": 0, "g": 100, "b": 0 }));
    assert_eq!(json["cmyk"], json!({ "c": 100, "m": 0, "y": 100, "k": 0 }));
}

#[tokio::test]
async fn test_pixel_color_reports_color_spaces() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/pixel-color?x=7&y=0", &sample_body(&quadrants(8)))
        .await;
    assert_ok(&response);

    let json: Value = response.json();
    let spaces = &json["color_spaces"];
    assert_eq!(spaces["hsl"]["formatted"], "hsl(120, 100%, 50%)");
    assert_eq!(spaces["hsv"]["formatted"], "hsv(120, 100%, 100%)");
    assert_eq!(spaces["hwb"]["formatted"], "hwb(120 0% 0%)");
    let hsl: Vec<f64> = serde_json::from_value(spaces["hsl"]["values"].clone()).unwrap();
    for (actual, expected) in hsl.iter().zip([120.0, 1.0, 0.5]) {
        assert!((actual - expected).abs() < 1e-9, "hsl values {hsl:?}");
    }
    for key in ["lab", "lch", "oklab", "oklch", "xyz"] {
        assert_eq!(spaces[key]["values"].as_array().unwrap().len(), 3, "{key}");
        assert!(spaces[key]["formatted"].as_str().unwrap().starts_with(key));
    }
}

#[tokio::test]
async fn test_pixel_color_clamps_out_of_range() {
    let app = TestApp::new();
    let body = sample_body(&quadrants(8));

    let response = app.post_json("/api/pixel-color?x=-5&y=100", &body).await;
    assert_ok(&response);
    let json: Value = response.json();
    assert_eq!(json["hex"], "#0000ff");
    assert_eq!(json["coordinates"], json!({ "x": 0, "y": 7 }));

    let response = app.post_json("/api/pixel-color?x=8&y=8", &body).await;
    let json: Value = response.json();
    assert_eq!(json["hex"], "#ffffff");
    assert_eq!(json["coordinates"], json!({ "x": 7, "y": 7 }));
}

#[tokio::test]
async fn test_pixel_color_accepts_data_url() {
    let app = TestApp::new();

    let body = json!({ "image_data": png_data_url(&quadrants(4)) });
    let response = app.post_json("/api/pixel-color?x=0&y=0", &body).await;

    assert_ok(&response);
    let json: Value = response.json();
    assert_eq!(json["hex"], "#ff0000");
}

#[tokio::test]
async fn test_pixel_color_upper_case_hex() {
    let mut config = AppConfig::default();
    config.sampler.hex_case = HexCaseSetting::Upper;
    let app = TestApp::with_config(config);

    let response = app
        .post_json("/api/pixel-color?x=7&y=0", &sample_body(&quadrants(8)))
        .await;
    let json: Value = response.json();
    assert_eq!(json["hex"], "#00FF00");
}

#[tokio::test]
async fn test_pixel_color_errors() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/pixel-color?x=0&y=0", &json!({ "image_data": "bm9wZQ==" }))
        .await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);

    // Missing query parameters
    let response = app
        .post_json("/api/pixel-color?x=1", &sample_body(&quadrants(4)))
        .await;
    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pixel_grid_at_center() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/pixel-grid?x=3.5&y=3.5&size=3",
            &sample_body(&quadrants(8)),
        )
        .await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["size"], 3);
    assert_eq!(json["center"], json!({ "x": 3, "y": 3 }));
    assert_eq!(
        json["grid"],
        json!([
            ["#ff0000", "#ff0000", "#00ff00"],
            ["#ff0000", "#ff0000", "#00ff00"],
            ["#0000ff", "#0000ff", "#ffffff"],
        ])
    );
}

#[tokio::test]
async fn test_pixel_grid_repeats_border_pixels() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/pixel-grid?x=0&y=0&size=3", &sample_body(&quadrants(8)))
        .await;
    assert_ok(&response);

    let json: Value = response.json();
    let grid: Vec<Vec<String>> = serde_json::from_value(json["grid"].clone()).unwrap();
    assert_eq!(grid.len(), 3);
    assert!(grid.iter().flatten().all(|hex| hex == "#ff0000"));
}

#[tokio::test]
async fn test_pixel_grid_default_size() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/pixel-grid?x=2&y=2", &sample_body(&quadrants(8)))
        .await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["size"], 11);
    let grid = json["grid"].as_array().unwrap();
    assert_eq!(grid.len(), 11);
    assert!(grid.iter().all(|row| row.as_array().unwrap().len() == 11));
}

#[tokio::test]
async fn test_pixel_grid_rejects_even_or_zero_size() {
    let app = TestApp::new();
    let body = sample_body(&quadrants(8));

    for size in [0, 4] {
        let path = format!("/api/pixel-grid?x=1&y=1&size={size}");
        let response = app.post_json(&path, &body).await;
        assert_api_error(&response, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_pixel_grid_rejects_oversize_before_decoding() {
    let app = TestApp::new();

    // The image is never decoded, so a broken payload still yields 422
    let response = app
        .post_json(
            "/api/pixel-grid?x=0&y=0&size=65535",
            &json!({ "image_data": "not an image" }),
        )
        .await;
    assert_api_error(&response, StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = response.json();
    assert_eq!(
        json["error"],
        "Invalid configuration: grid size must be at most 51, got 65535"
    );

    // The limit itself is allowed
    let response = app
        .post_json("/api/pixel-grid?x=0&y=0&size=51", &sample_body(&quadrants(8)))
        .await;
    assert_ok(&response);
    assert_eq!(response.json::<Value>()["grid"].as_array().unwrap().len(), 51);
}

#[tokio::test]
async fn test_pixel_grid_limit_from_config() {
    let mut config = AppConfig::default();
    config.sampler.grid_size = 3;
    config.sampler.max_grid_size = 5;
    let app = TestApp::with_config(config);
    let body = sample_body(&quadrants(8));

    let response = app.post_json("/api/pixel-grid?x=1&y=1&size=7", &body).await;
    assert_api_error(&response, StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.post_json("/api/pixel-grid?x=1&y=1&size=5", &body).await;
    assert_ok(&response);
}
