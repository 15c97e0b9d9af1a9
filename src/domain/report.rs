use serde::Serialize;

use super::{FailedRequests, PERCENTILE_POINTS, ResponseCodes};

/// Global view of one attack, computed once from the resolved worker results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub total_complete_requests: u64,
    pub total_failed_requests: u64,
    pub failed_requests: FailedRequests,
    pub response_codes: ResponseCodes,
    /// Sum of worker throughputs.
    pub mean_requests_per_second: f64,
    /// Mean of worker mean latencies.
    pub mean_time_per_request_ms: f64,
    /// 100 non-decreasing values, or empty when no requests completed.
    pub global_latency_percentiles: Vec<f64>,
    pub num_completed: usize,
    pub num_timeout: usize,
    pub num_transport_error: usize,
}

impl AggregateReport {
    #[must_use]
    pub const fn dispatched_workers(&self) -> usize {
        self.num_completed
            .saturating_add(self.num_timeout)
            .saturating_add(self.num_transport_error)
    }

    #[must_use]
    pub fn has_percentiles(&self) -> bool {
        self.global_latency_percentiles.len() == PERCENTILE_POINTS
    }

    /// Latency below which `percentile`% of all completed requests finished.
    #[must_use]
    pub fn percentile(&self, percentile: usize) -> Option<f64> {
        self.global_latency_percentiles.get(percentile).copied()
    }

    #[must_use]
    pub fn p50(&self) -> Option<f64> {
        self.percentile(49)
    }

    #[must_use]
    pub fn p90(&self) -> Option<f64> {
        self.percentile(89)
    }

    #[must_use]
    pub fn p99(&self) -> Option<f64> {
        self.percentile(98)
    }
}
