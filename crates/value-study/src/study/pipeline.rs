//! The three-pass value-study transform.

use super::composite::composite_pixel;
use super::config::ValueStudyConfig;
use super::edges::edge_strengths;
use crate::color::{posterize_luminance, rgb_to_luminance};
use crate::error::ConfigError;
use crate::raster::Raster;

/// Pass 1: per-pixel luminance, posterized when the config asks for fewer
/// than 10 steps.
///
/// The returned buffer is single-channel and row-major, one byte per pixel.
/// It feeds both the edge pass and the composite; the source colors are not
/// read again after this.
pub fn luminance_buffer(raster: &Raster, config: &ValueStudyConfig) -> Vec<u8> {
    let posterize = config.posterizes();
    let steps = config.steps;
    raster
        .pixels()
        .map(|[r, g, b, _]| {
            let l = rgb_to_luminance(r, g, b);
            if posterize {
                posterize_luminance(l, steps)
            } else {
                l
            }
        })
        .collect()
}

/// Render a value study of `raster`.
///
/// Runs luminance (pass 1), optional Laplacian edges (pass 2) and the
/// composite (pass 3) into a new raster of the same size. The input is not
/// touched, so the same source can be re-run with other settings.
///
/// # Errors
///
/// Invalid `steps` or a raster whose buffer does not match its dimensions
/// are rejected before any pixel is processed.
///
/// # Example
///
/// ```
/// use value_study::{run_value_study, Raster, ValueStudyConfig};
///
/// let source = Raster::from_fn(4, 1, |x, _| {
///     let v = (x * 85) as u8;
///     [v, v, v, 200]
/// })
/// .unwrap();
///
/// let study = run_value_study(&source, &ValueStudyConfig::new().steps(2)).unwrap();
/// let values: Vec<u8> = study.pixels().map(|p| p[0]).collect();
/// // Gamma-decoded 170 is only 103 of 255, so it falls in the dark bin
/// assert_eq!(values, vec![0, 0, 0, 255]);
/// assert!(study.pixels().all(|p| p[3] == 200));
/// ```
pub fn run_value_study(raster: &Raster, config: &ValueStudyConfig) -> Result<Raster, ConfigError> {
    config.validate()?;
    raster.validate()?;

    let width = raster.width() as usize;
    let height = raster.height() as usize;

    let luminance = luminance_buffer(raster, config);
    let edges = config
        .edge_detection
        .then(|| edge_strengths(&luminance, width, height));

    let recolor = config.recolor.as_ref();
    let mut data = Vec::with_capacity(raster.as_bytes().len());
    for (i, (l, [_, _, _, alpha])) in luminance.iter().zip(raster.pixels()).enumerate() {
        let edge = edges.as_ref().map(|e| e[i]);
        let color = composite_pixel(*l, edge, recolor);
        data.extend_from_slice(&[color.r, color.g, color.b, alpha]);
    }

    Ok(Raster::from_parts(raster.width(), raster.height(), data))
}
