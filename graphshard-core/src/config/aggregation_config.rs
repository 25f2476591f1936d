use serde::{Deserialize, Serialize};

/// Below this fraction of active vertices the index scan is preferred over the edge scan.
pub const DEFAULT_INDEX_SCAN_THRESHOLD: f32 = 0.8;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy, Serialize)]
pub struct AggregationConfig {
    pub index_scan_threshold: f32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            index_scan_threshold: DEFAULT_INDEX_SCAN_THRESHOLD,
        }
    }
}
