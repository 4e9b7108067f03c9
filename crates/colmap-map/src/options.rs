//! Engine tuning options.

use colmap_model::DEFAULT_SAMPLE_LIMIT;
use serde::{Deserialize, Serialize};

/// Heuristic results below this confidence trigger the model fallback.
pub const DEFAULT_FALLBACK_THRESHOLD: f64 = 0.5;

/// Options for [`MappingEngine`](crate::MappingEngine).
///
/// Deserializable so front ends can read them from an `[engine]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Non-empty values sampled per column.
    pub sample_limit: usize,
    /// Provisional confidence below which the fallback is consulted.
    pub fallback_threshold: f64,
    /// Worker threads used to classify headers concurrently.
    pub workers: usize,
    /// Whether a configured completion client may be used at all.
    pub fallback_enabled: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
            workers: 1,
            fallback_enabled: true,
        }
    }
}

impl EngineOptions {
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn with_fallback_enabled(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }
}
