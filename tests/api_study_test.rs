//! Tests for the /api/value-study endpoint.

mod common;

use axum::http::StatusCode;
use common::fixtures::{self, gradient, png_base64, png_data_url, quadrants, solid};
use common::{assert_api_error, assert_png, assert_status, TestApp};
use hueloupe::models::AppConfig;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_study_returns_png_of_same_size() {
    let app = TestApp::new();

    let body = json!({ "image_data": png_base64(&gradient(32, 8)) });
    let response = app.post_json("/api/value-study", &body).await;

    assert_png(&response);
    assert_eq!(response.header("x-study-width"), Some("32"));
    assert_eq!(response.header("x-study-height"), Some("8"));
    assert_eq!(response.header("cache-control"), Some("no-store"));

    let study = fixtures::decode_png(response.bytes());
    assert_eq!((study.width(), study.height()), (32, 8));
    assert!(
        study.pixels().all(|[r, g, b, _]| r == g && g == b),
        "Plain study should be grayscale"
    );
}

#[tokio::test]
async fn test_two_steps_posterizes_to_black_and_white() {
    let app = TestApp::new();

    // Red and blue are dark in luminance, green and white are light
    let body = json!({ "image_data": png_base64(&quadrants(8)), "steps": 2 });
    let response = app.post_json("/api/value-study", &body).await;
    assert_png(&response);

    let study = fixtures::decode_png(response.bytes());
    assert_eq!(study.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(study.pixel(7, 0), [255, 255, 255, 255]);
    assert_eq!(study.pixel(0, 7), [0, 0, 0, 255]);
    assert_eq!(study.pixel(7, 7), [255, 255, 255, 255]);
}

#[tokio::test]
async fn test_edge_detection_darkens_boundaries_only() {
    let app = TestApp::new();
    let image = png_base64(&quadrants(8));

    let plain = app
        .post_json("/api/value-study", &json!({ "image_data": image }))
        .await;
    let edged = app
        .post_json(
            "/api/value-study",
            &json!({ "image_data": image, "edge_detection": true }),
        )
        .await;
    assert_png(&plain);
    assert_png(&edged);

    let plain = fixtures::decode_png(plain.bytes());
    let edged = fixtures::decode_png(edged.bytes());

    // Inside the red quadrant nothing changes
    assert_eq!(plain.pixel(1, 1), edged.pixel(1, 1));
    // Just right of the red/green boundary the value is pulled down
    assert!(
        edged.pixel(4, 1)[0] < plain.pixel(4, 1)[0],
        "Expected {:?} darker than {:?}",
        edged.pixel(4, 1),
        plain.pixel(4, 1)
    );
}

#[tokio::test]
async fn test_recolor_by_preset_name() {
    let app = TestApp::new();

    let body = json!({
        "image_data": png_base64(&solid(4, 4, [0, 0, 0, 255])),
        "recolor": "Sepia",
    });
    let response = app.post_json("/api/value-study", &body).await;
    assert_png(&response);

    // Black maps onto the base color itself
    let study = fixtures::decode_png(response.bytes());
    assert!(study.pixels().all(|p| p == [139, 69, 19, 255]));
}

#[tokio::test]
async fn test_recolor_by_hex_keeps_white_and_alpha() {
    let app = TestApp::new();

    let body = json!({
        "image_data": png_base64(&solid(3, 3, [255, 255, 255, 90])),
        "recolor": "#e401b1",
    });
    let response = app.post_json("/api/value-study", &body).await;
    assert_png(&response);

    let study = fixtures::decode_png(response.bytes());
    assert!(study.pixels().all(|p| p == [255, 255, 255, 90]));
}

#[tokio::test]
async fn test_data_url_payload_accepted() {
    let app = TestApp::new();

    let body = json!({ "image_data": png_data_url(&gradient(10, 2)) });
    let response = app.post_json("/api/value-study", &body).await;

    assert_png(&response);
}

#[tokio::test]
async fn test_repeated_study_served_from_cache() {
    let app = TestApp::new();
    let body = json!({ "image_data": png_base64(&gradient(16, 16)), "steps": 5 });

    let first = app.post_json("/api/value-study", &body).await;
    let second = app.post_json("/api/value-study", &body).await;

    assert_png(&first);
    assert_png(&second);
    assert_eq!(first.header("x-cache"), Some("MISS"));
    assert_eq!(second.header("x-cache"), Some("HIT"));
    assert_eq!(first.bytes(), second.bytes());
    assert_eq!(app.studies.cache_stats().0, 1);

    // Different settings are a different entry
    let other = json!({ "image_data": png_base64(&gradient(16, 16)), "steps": 6 });
    let third = app.post_json("/api/value-study", &other).await;
    assert_eq!(third.header("x-cache"), Some("MISS"));
    assert_eq!(app.studies.cache_stats().0, 2);
}

#[tokio::test]
async fn test_large_input_is_downscaled() {
    let mut config = AppConfig::default();
    config.study.max_dimension = 50;
    let app = TestApp::with_config(config);

    let body = json!({ "image_data": png_base64(&gradient(100, 20)) });
    let response = app.post_json("/api/value-study", &body).await;

    assert_png(&response);
    assert_eq!(response.header("x-study-width"), Some("50"));
    assert_eq!(response.header("x-study-height"), Some("10"));
}

#[tokio::test]
async fn test_invalid_steps_rejected() {
    let app = TestApp::new();
    let image = png_base64(&gradient(4, 4));

    // Values outside u8 get the same JSON error as 11 does
    for steps in [-1, 0, 1, 11, 255, 256, 300] {
        let body = json!({ "image_data": image, "steps": steps });
        let response = app.post_json("/api/value-study", &body).await;
        assert_api_error(&response, StatusCode::UNPROCESSABLE_ENTITY);

        let json: Value = response.json();
        assert_eq!(
            json["error"],
            format!("Invalid configuration: steps must be between 2 and 10, got {steps}")
        );
    }
}

#[tokio::test]
async fn test_invalid_steps_reported_before_bad_image() {
    let app = TestApp::new();

    let body = json!({ "image_data": "not an image", "steps": 1 });
    let response = app.post_json("/api/value-study", &body).await;

    assert_api_error(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_recolor_rejected() {
    let app = TestApp::new();

    let body = json!({ "image_data": png_base64(&gradient(4, 4)), "recolor": "umber" });
    let response = app.post_json("/api/value-study", &body).await;

    assert_api_error(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_bad_image_data_rejected() {
    let app = TestApp::new();

    for image_data in ["", "data:image/png;base64,", "%%%", "bm90IGFuIGltYWdl"] {
        let body = json!({ "image_data": image_data });
        let response = app.post_json("/api/value-study", &body).await;
        assert_api_error(&response, StatusCode::BAD_REQUEST);
    }
    assert_eq!(app.studies.cache_stats().0, 0);
}

#[tokio::test]
async fn test_malformed_request_bodies() {
    let app = TestApp::new();

    let response = app.post_raw("/api/value-study", "{not json").await;
    assert_status(&response, StatusCode::BAD_REQUEST);

    let response = app.post_json("/api/value-study", &json!({ "steps": 4 })).await;
    assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
}
