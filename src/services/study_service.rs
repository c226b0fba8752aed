use std::sync::Arc;
use value_study::{run_value_study, ValueStudyConfig};

use crate::error::{ApiError, RenderError};
use crate::rendering::encode_png;
use crate::services::decoder::decode_raster_limited;
use crate::services::study_cache::{compute_cache_key, CachedStudy, StudyCache};

/// Result of a study request
pub struct RenderedStudy {
    pub study: CachedStudy,
    /// Whether the study came from the cache
    pub cached: bool,
}

/// Decode, transform and encode value studies, with result caching
pub struct StudyService {
    cache: StudyCache,
    max_dimension: u32,
}

impl StudyService {
    pub fn new(max_dimension: u32, cache_entries: usize) -> Self {
        Self {
            cache: StudyCache::new(cache_entries),
            max_dimension,
        }
    }

    /// Render a study of an encoded image.
    ///
    /// Settings are validated before the image is decoded. Uses
    /// spawn_blocking for the decode/transform/encode work.
    pub async fn render(
        &self,
        image_bytes: Vec<u8>,
        config: ValueStudyConfig,
    ) -> Result<RenderedStudy, ApiError> {
        config.validate()?;

        let key = compute_cache_key(&image_bytes, &config, self.max_dimension);
        if let Some(study) = self.cache.get(&key) {
            return Ok(RenderedStudy {
                study,
                cached: true,
            });
        }

        let max_dimension = self.max_dimension;
        let study = tokio::task::spawn_blocking(move || {
            render_study(&image_bytes, &config, max_dimension)
        })
        .await
        .map_err(|e| RenderError::Task(format!("Study task failed: {e}")))??;

        tracing::info!(
            width = study.width,
            height = study.height,
            steps = config.steps,
            edges = config.edge_detection,
            recolor = config.recolor.is_some(),
            png_bytes = study.png_bytes.len(),
            "Rendered value study"
        );

        self.cache.store(key, study.clone());
        let (entries, capacity) = self.cache_stats();
        tracing::debug!(entries, capacity, "Study cached");

        Ok(RenderedStudy {
            study,
            cached: false,
        })
    }

    /// `(entries, capacity)` of the result cache
    pub fn cache_stats(&self) -> (usize, usize) {
        self.cache.stats()
    }
}

/// Synchronous decode → transform → encode.
pub fn render_study(
    image_bytes: &[u8],
    config: &ValueStudyConfig,
    max_dimension: u32,
) -> Result<CachedStudy, ApiError> {
    let raster = decode_raster_limited(image_bytes, max_dimension)?;
    let study = run_value_study(&raster, config)?;
    let png_bytes = encode_png(&study)?;

    Ok(CachedStudy {
        png_bytes: Arc::new(png_bytes),
        width: study.width(),
        height: study.height(),
    })
}
