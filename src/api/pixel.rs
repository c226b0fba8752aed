use axum::{
    extract::{Query, State},
    response::Json,
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use value_study::color::{color_spaces, rgb_to_cmyk, rgb_to_percentages, ColorSpaceValue};
use value_study::{sample_at, sample_grid, ColorSample};

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::decoder::decode_payload;

/// Request body carrying the image to sample
#[derive(Debug, Deserialize, ToSchema)]
pub struct SampleRequest {
    /// Base64 image, or a `data:image/...;base64,` URL
    pub image_data: String,
}

/// Source-space point to sample
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PixelQuery {
    /// Horizontal source coordinate (floored, clamped into the image)
    pub x: f64,
    /// Vertical source coordinate (floored, clamped into the image)
    pub y: f64,
}

/// Point and neighborhood size for a grid sample
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GridQuery {
    pub x: f64,
    pub y: f64,
    /// Odd neighborhood size (default from config, usually 11; at most
    /// `sampler.max_grid_size`)
    pub size: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RgbValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PixelCoordinates {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CmykValue {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

/// One color space reading
#[derive(Debug, Serialize, ToSchema)]
pub struct ColorSpaceEntry {
    /// Raw components (hues in degrees, HSL/HSV/HWB percentages as 0-1)
    pub values: Vec<f64>,
    /// CSS-like notation, e.g. `hsl(0, 100%, 50%)`
    pub formatted: String,
}

impl From<ColorSpaceValue> for ColorSpaceEntry {
    fn from(value: ColorSpaceValue) -> Self {
        Self {
            values: value.values.to_vec(),
            formatted: value.formatted,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ColorSpacesValue {
    pub hsl: ColorSpaceEntry,
    pub hsv: ColorSpaceEntry,
    pub hwb: ColorSpaceEntry,
    /// CIELAB, D65
    pub lab: ColorSpaceEntry,
    pub lch: ColorSpaceEntry,
    pub oklab: ColorSpaceEntry,
    pub oklch: ColorSpaceEntry,
    /// CIE XYZ, D65, Y of white = 1
    pub xyz: ColorSpaceEntry,
}

/// A sampled color with its breakdowns
#[derive(Debug, Serialize, ToSchema)]
pub struct PixelColorResponse {
    /// `#rrggbb`
    pub hex: String,
    pub rgb: RgbValue,
    /// Pixel actually read, after clamping
    pub coordinates: PixelCoordinates,
    /// Channels as whole percentages
    pub percentages: RgbValue,
    pub cmyk: CmykValue,
    pub color_spaces: ColorSpacesValue,
}

impl From<ColorSample> for PixelColorResponse {
    fn from(sample: ColorSample) -> Self {
        let rgb = sample.rgb;
        let percentages = rgb_to_percentages(rgb.r, rgb.g, rgb.b);
        let cmyk = rgb_to_cmyk(rgb.r, rgb.g, rgb.b);
        let spaces = color_spaces(rgb);
        Self {
            hex: sample.hex,
            rgb: RgbValue {
                r: rgb.r,
                g: rgb.g,
                b: rgb.b,
            },
            coordinates: PixelCoordinates {
                x: sample.coordinates.0,
                y: sample.coordinates.1,
            },
            percentages: RgbValue {
                r: percentages.r,
                g: percentages.g,
                b: percentages.b,
            },
            cmyk: CmykValue {
                c: cmyk.c,
                m: cmyk.m,
                y: cmyk.y,
                k: cmyk.k,
            },
            color_spaces: ColorSpacesValue {
                hsl: spaces.hsl.into(),
                hsv: spaces.hsv.into(),
                hwb: spaces.hwb.into(),
                lab: spaces.lab.into(),
                lch: spaces.lch.into(),
                oklab: spaces.oklab.into(),
                oklch: spaces.oklch.into(),
                xyz: spaces.xyz.into(),
            },
        }
    }
}

/// Colors of a square neighborhood
#[derive(Debug, Serialize, ToSchema)]
pub struct PixelGridResponse {
    pub size: u32,
    /// Center pixel, after clamping
    pub center: PixelCoordinates,
    /// `size` rows of `size` hex colors, top to bottom
    pub grid: Vec<Vec<String>>,
}

/// Sample the color of one pixel
///
/// Coordinates are floored and clamped, so points slightly outside the
/// image read the nearest border pixel.
#[utoipa::path(
    post,
    path = "/api/pixel-color",
    request_body = SampleRequest,
    params(PixelQuery),
    responses(
        (status = 200, description = "Sampled color", body = PixelColorResponse),
        (status = 400, description = "Image data missing or undecodable"),
    ),
    tag = "Sampling"
)]
pub async fn handle_pixel_color(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<PixelQuery>,
    JsonExtractor(request): JsonExtractor<SampleRequest>,
) -> Result<Json<PixelColorResponse>, ApiError> {
    let raster = decode_payload(request.image_data).await?;
    let sample = sample_at(&raster, query.x, query.y, config.hex_case());

    tracing::debug!(
        x = sample.coordinates.0,
        y = sample.coordinates.1,
        hex = %sample.hex,
        "Pixel sampled"
    );

    Ok(Json(sample.into()))
}

/// Sample a square neighborhood around a pixel
///
/// Each cell is clamped on its own, so neighborhoods at the border repeat
/// edge pixels.
#[utoipa::path(
    post,
    path = "/api/pixel-grid",
    request_body = SampleRequest,
    params(GridQuery),
    responses(
        (status = 200, description = "Neighborhood colors", body = PixelGridResponse),
        (status = 400, description = "Image data missing or undecodable"),
        (status = 422, description = "Grid size is zero, even or above the configured maximum"),
    ),
    tag = "Sampling"
)]
pub async fn handle_pixel_grid(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<GridQuery>,
    JsonExtractor(request): JsonExtractor<SampleRequest>,
) -> Result<Json<PixelGridResponse>, ApiError> {
    let size = config.grid_size(query.size)?;
    let case = config.hex_case();

    let raster = decode_payload(request.image_data).await?;
    let grid = sample_grid(&raster, query.x, query.y, size, case)?;
    let center = sample_at(&raster, query.x, query.y, case).coordinates;

    Ok(Json(PixelGridResponse {
        size,
        center: PixelCoordinates {
            x: center.0,
            y: center.1,
        },
        grid,
    }))
}
