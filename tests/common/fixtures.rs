//! Test fixtures: small encoded images and request bodies.

use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use value_study::Raster;

use hueloupe::rendering::encode_png;

/// Distinct colors of the 2x2 quadrant image, row-major
pub mod quadrant_colors {
    pub const TOP_LEFT: [u8; 4] = [255, 0, 0, 255];
    pub const TOP_RIGHT: [u8; 4] = [0, 255, 0, 255];
    pub const BOTTOM_LEFT: [u8; 4] = [0, 0, 255, 255];
    pub const BOTTOM_RIGHT: [u8; 4] = [255, 255, 255, 255];
}

/// Horizontal gray ramp from black to white
pub fn gradient(width: u32, height: u32) -> Raster {
    Raster::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1).max(1)) as u8;
        [v, v, v, 255]
    })
    .unwrap()
}

/// `size x size` image split into four solid quadrants
pub fn quadrants(size: u32) -> Raster {
    use quadrant_colors::*;
    let half = size / 2;
    Raster::from_fn(size, size, |x, y| match (x < half, y < half) {
        (true, true) => TOP_LEFT,
        (false, true) => TOP_RIGHT,
        (true, false) => BOTTOM_LEFT,
        (false, false) => BOTTOM_RIGHT,
    })
    .unwrap()
}

/// Solid-color image
pub fn solid(width: u32, height: u32, pixel: [u8; 4]) -> Raster {
    Raster::from_fn(width, height, |_, _| pixel).unwrap()
}

/// PNG bytes as plain base64
pub fn png_base64(raster: &Raster) -> String {
    general_purpose::STANDARD.encode(encode_png(raster).unwrap())
}

/// PNG bytes as a browser-style data URL
pub fn png_data_url(raster: &Raster) -> String {
    format!("data:image/png;base64,{}", png_base64(raster))
}

/// Decode a PNG response body back into a raster
pub fn decode_png(bytes: &[u8]) -> Raster {
    let image = image::load_from_memory(bytes).unwrap().to_rgba8();
    let (width, height) = image.dimensions();
    Raster::from_rgba(width, height, image.into_raw()).unwrap()
}

/// Body for the sampling endpoints
pub fn sample_body(raster: &Raster) -> serde_json::Value {
    json!({ "image_data": png_base64(raster) })
}
