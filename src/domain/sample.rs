use serde::{Deserialize, Serialize};

use crate::error::SampleError;

/// Number of points in every latency percentile list, per worker and global.
pub const PERCENTILE_POINTS: usize = 100;

/// Failed request counts, broken down the way the benchmarking tool reports
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRequests {
    #[serde(default)]
    pub connect: u64,
    #[serde(default)]
    pub receive: u64,
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub exceptions: u64,
}

impl FailedRequests {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.connect
            .saturating_add(self.receive)
            .saturating_add(self.length)
            .saturating_add(self.exceptions)
    }

    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            connect: self.connect.saturating_add(other.connect),
            receive: self.receive.saturating_add(other.receive),
            length: self.length.saturating_add(other.length),
            exceptions: self.exceptions.saturating_add(other.exceptions),
        }
    }
}

/// Response status histogram by class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCodes {
    #[serde(rename = "2xx", default)]
    pub success: u64,
    #[serde(rename = "3xx", default)]
    pub redirect: u64,
    #[serde(rename = "4xx", default)]
    pub client_error: u64,
    #[serde(rename = "5xx", default)]
    pub server_error: u64,
}

impl ResponseCodes {
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            success: self.success.saturating_add(other.success),
            redirect: self.redirect.saturating_add(other.redirect),
            client_error: self.client_error.saturating_add(other.client_error),
            server_error: self.server_error.saturating_add(other.server_error),
        }
    }
}

/// Exactly [`PERCENTILE_POINTS`] finite, non-negative, non-decreasing latency
/// values in milliseconds. Index `i` approximates the i-th percentile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct LatencyPercentiles(Vec<f64>);

impl LatencyPercentiles {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Fastest recorded percentile point.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.0.first().copied().unwrap_or_default()
    }

    /// Slowest recorded percentile point.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.0.last().copied().unwrap_or_default()
    }
}

impl TryFrom<Vec<f64>> for LatencyPercentiles {
    type Error = SampleError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if values.len() != PERCENTILE_POINTS {
            return Err(SampleError::WrongPercentileCount {
                expected: PERCENTILE_POINTS,
                actual: values.len(),
            });
        }
        let mut previous = 0.0_f64;
        for (index, value) in values.iter().copied().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(SampleError::InvalidLatency { index, value });
            }
            if value < previous {
                return Err(SampleError::DecreasingLatency {
                    index,
                    previous,
                    current: value,
                });
            }
            previous = value;
        }
        Ok(Self(values))
    }
}

impl From<LatencyPercentiles> for Vec<f64> {
    fn from(value: LatencyPercentiles) -> Self {
        value.0
    }
}

/// One worker's self-reported benchmark summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub complete_requests: u64,
    #[serde(default)]
    pub failed_requests: FailedRequests,
    #[serde(default)]
    pub response_codes: ResponseCodes,
    pub requests_per_second: f64,
    pub mean_time_per_request_ms: f64,
    pub latency_percentiles: LatencyPercentiles,
}

impl Sample {
    /// Checks the scalar metrics; the percentile list is validated on
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns an error when throughput or mean latency is negative or not
    /// finite.
    pub fn validate(&self) -> Result<(), SampleError> {
        for (field, value) in [
            ("requests_per_second", self.requests_per_second),
            ("mean_time_per_request_ms", self.mean_time_per_request_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SampleError::InvalidMetric { field, value });
            }
        }
        Ok(())
    }
}
