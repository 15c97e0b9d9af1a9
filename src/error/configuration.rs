use thiserror::Error;

/// Invalid request/concurrency/fleet combinations, raised before any worker
/// is contacted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No workers are ready to attack (fleet is empty).")]
    EmptyFleet,
    #[error(
        "Request count {requests} is too small for {workers} worker(s); need at least {minimum}."
    )]
    TooFewRequests {
        requests: u64,
        workers: usize,
        minimum: u64,
    },
    #[error("Concurrency {concurrency} is lower than the worker count {workers}.")]
    ConcurrencyBelowFleet { concurrency: u64, workers: usize },
    #[error("Concurrency {concurrency} exceeds the request count {requests}.")]
    ConcurrencyAboveRequests { concurrency: u64, requests: u64 },
    #[error("Invalid target URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Per-worker timeout must be > 0.")]
    ZeroTimeout,
}
