use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("Expected {expected} latency percentiles, got {actual}.")]
    WrongPercentileCount { expected: usize, actual: usize },
    #[error("Latency percentile {index} is not a finite, non-negative value ({value}).")]
    InvalidLatency { index: usize, value: f64 },
    #[error("Latency percentiles decrease at index {index} ({previous} > {current}).")]
    DecreasingLatency {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("Field '{field}' is not a finite, non-negative value ({value}).")]
    InvalidMetric { field: &'static str, value: f64 },
}
