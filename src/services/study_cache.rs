//! Rendered value-study cache with LRU eviction.
//!
//! Studies are pure functions of (image bytes, settings), so an entry never
//! goes stale; the only policy needed is a bound on how many are kept.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use value_study::ValueStudyConfig;

/// A rendered study ready to be served
#[derive(Clone)]
pub struct CachedStudy {
    /// Encoded PNG
    pub png_bytes: Arc<Vec<u8>>,
    /// Output dimensions, after any downscaling
    pub width: u32,
    pub height: u32,
}

struct Entries {
    cache: HashMap<String, CachedStudy>,
    /// Keys by recency of use (oldest first)
    usage_order: Vec<String>,
}

/// Thread-safe LRU cache of rendered studies.
pub struct StudyCache {
    entries: Mutex<Entries>,
    max_entries: usize,
}

impl StudyCache {
    /// A cache holding at most `max_entries` studies; 0 disables caching.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(Entries {
                cache: HashMap::new(),
                usage_order: Vec::new(),
            }),
            max_entries,
        }
    }

    /// Look up a study, marking it as recently used.
    pub fn get(&self, key: &str) -> Option<CachedStudy> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let study = entries.cache.get(key)?.clone();

        entries.usage_order.retain(|k| k != key);
        entries.usage_order.push(key.to_string());

        tracing::debug!(cache_key = %key, "Study cache hit");
        Some(study)
    }

    /// Store a study, evicting the least recently used entries if full.
    pub fn store(&self, key: String, study: CachedStudy) {
        if self.max_entries == 0 {
            return;
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.cache.contains_key(&key) {
            entries.usage_order.retain(|k| k != &key);
        }

        while entries.cache.len() >= self.max_entries && !entries.usage_order.is_empty() {
            let oldest_key = entries.usage_order.remove(0);
            entries.cache.remove(&oldest_key);
            tracing::debug!(
                key = %oldest_key,
                cache_size = entries.cache.len(),
                "Study cache: evicted least recently used entry"
            );
        }

        entries.cache.insert(key.clone(), study);
        entries.usage_order.push(key);
    }

    /// `(entries, capacity)`
    pub fn stats(&self) -> (usize, usize) {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        (entries.cache.len(), self.max_entries)
    }
}

/// Compute a cache key for a study request.
///
/// The key is a SHA256 hash of the encoded image, every setting that
/// affects the output, and the input size limit.
pub fn compute_cache_key(image_bytes: &[u8], config: &ValueStudyConfig, max_dimension: u32) -> String {
    let mut hasher = Sha256::new();

    hasher.update(b"steps:");
    hasher.update([config.steps]);
    hasher.update(b"|edges:");
    hasher.update([config.edge_detection as u8]);
    hasher.update(b"|recolor:");
    match config.recolor {
        Some(recolor) => hasher.update(recolor.base.to_bytes()),
        None => hasher.update(b"none"),
    }
    hasher.update(b"|max:");
    hasher.update(max_dimension.to_le_bytes());
    hasher.update(b"|image:");
    hasher.update(image_bytes);

    let result = hasher.finalize();
    // First 16 bytes of the hash, encoded as 32 hex characters
    hex::encode(&result[..16])
}
