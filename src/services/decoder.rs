//! Turn request payloads into rasters.
//!
//! Images arrive as base64, optionally wrapped in a `data:` URL as produced
//! by a browser's `FileReader`. Decoding is CPU-bound, so the async entry
//! points run it on the blocking pool.

use base64::{engine::general_purpose, Engine as _};
use image::imageops::FilterType;
use value_study::{DecodeError, Raster};

use crate::error::{ApiError, RenderError};

/// Strip a `data:<mime>;base64,` prefix if present.
pub fn strip_data_url(data: &str) -> &str {
    let data = data.trim();
    match data.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, payload)| payload).unwrap_or(""),
        None => data,
    }
}

/// Base64 (or data URL) to encoded image bytes.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, DecodeError> {
    let payload = strip_data_url(data);
    if payload.is_empty() {
        return Err(DecodeError::Format("no image data provided".to_string()));
    }
    general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| DecodeError::Format(format!("invalid base64: {e}")))
}

/// Decode PNG/JPEG/GIF/WebP/BMP bytes into an RGBA raster.
pub fn decode_raster(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| DecodeError::Format(e.to_string()))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Raster::from_rgba(width, height, rgba.into_raw())
}

/// Size an image is reduced to so neither side exceeds `max_dimension`.
///
/// Aspect is kept via `scale = min(max / w, max / h)`; the result is
/// floored and never below 1. Images that fit are returned unchanged.
pub fn limited_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if max_dimension == 0 || (width <= max_dimension && height <= max_dimension) {
        return (width, height);
    }
    let max = max_dimension as f64;
    let scale = (max / width as f64).min(max / height as f64);
    let w = ((width as f64 * scale).floor() as u32).max(1);
    let h = ((height as f64 * scale).floor() as u32).max(1);
    (w, h)
}

/// Decode and downscale so neither side exceeds `max_dimension`.
pub fn decode_raster_limited(bytes: &[u8], max_dimension: u32) -> Result<Raster, DecodeError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| DecodeError::Format(e.to_string()))?;
    let (width, height) = (image.width(), image.height());
    let (w, h) = limited_dimensions(width, height, max_dimension);

    let image = if (w, h) != (width, height) {
        tracing::debug!(
            from_width = width,
            from_height = height,
            to_width = w,
            to_height = h,
            "Downscaling study input"
        );
        image.resize_exact(w, h, FilterType::Triangle)
    } else {
        image
    };

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Raster::from_rgba(width, height, rgba.into_raw())
}

/// Decode a base64 payload into a full-resolution raster off the async runtime.
pub async fn decode_payload(data: String) -> Result<Raster, ApiError> {
    tokio::task::spawn_blocking(move || {
        let bytes = decode_base64(&data)?;
        decode_raster(&bytes)
    })
    .await
    .map_err(|e| RenderError::Task(format!("Decode task failed: {e}")))?
    .map_err(ApiError::from)
}
