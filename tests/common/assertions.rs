//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    // Check Content-Type header
    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert an error response with the JSON `{status, error}` body
pub fn assert_api_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected.as_u16(),
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected an error message");
}

/// Assert a snapshot's selection equals `(x, y, width, height)`
pub fn assert_selection(snapshot: &serde_json::Value, expected: (f64, f64, f64, f64)) {
    let selection = &snapshot["selection"];
    let actual = (
        selection["x"].as_f64().unwrap(),
        selection["y"].as_f64().unwrap(),
        selection["width"].as_f64().unwrap(),
        selection["height"].as_f64().unwrap(),
    );
    assert_eq!(actual, expected, "Unexpected selection in {snapshot}");
}

/// Assert a snapshot's selection lies inside a `width x height` image
pub fn assert_selection_within(snapshot: &serde_json::Value, width: f64, height: f64) {
    let s = &snapshot["selection"];
    let (x, y) = (s["x"].as_f64().unwrap(), s["y"].as_f64().unwrap());
    let (w, h) = (s["width"].as_f64().unwrap(), s["height"].as_f64().unwrap());
    assert!(
        x >= 0.0 && y >= 0.0 && x + w <= width + 1e-9 && y + h <= height + 1e-9,
        "Selection escaped the {width}x{height} image: {snapshot}"
    );
}
