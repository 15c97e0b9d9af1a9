use serde::{Deserialize, Serialize};

/// Pass/fail bounds for an attack. Both are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default, alias = "tpr")]
    pub max_time_per_request_ms: Option<f64>,
    #[serde(default, alias = "rps")]
    pub min_requests_per_second: Option<f64>,
}

impl ThresholdConfig {
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.max_time_per_request_ms.is_some() || self.min_requests_per_second.is_some()
    }
}
