use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::FleetDirectory;
use crate::error::ConfigurationError;

/// Each worker must be asked for at least this many requests.
const MIN_REQUESTS_PER_WORKER: u64 = 2;

/// Shared attack parameters, before they are split across the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackParameters {
    pub url: String,
    pub total_requests: u64,
    pub total_concurrency: u64,
    pub headers: Vec<(String, String)>,
    /// Upper bound on one worker's run, after which it resolves as timed out.
    pub timeout: Duration,
}

/// The slice of work every worker receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerAssignment {
    pub url: String,
    pub requests: u64,
    pub concurrency: u64,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

/// Validated, split attack. Only constructible through [`AttackPlan::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackPlan {
    assignment: WorkerAssignment,
    workers: usize,
    timeout: Duration,
    undispatched_requests: u64,
    undispatched_concurrency: u64,
}

impl AttackPlan {
    /// Checks the request/concurrency/fleet combination and splits the load
    /// evenly. Remainders are not distributed: every worker gets the same
    /// `floor(total / workers)` slice and the leftover is reported through
    /// [`AttackPlan::undispatched_requests`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the fleet is empty, when there
    /// are fewer than two requests per worker, when concurrency is below the
    /// worker count or above the request count, or when the URL or timeout
    /// is invalid.
    pub fn new(
        params: &AttackParameters,
        fleet: &FleetDirectory,
    ) -> Result<Self, ConfigurationError> {
        if fleet.is_empty() {
            return Err(ConfigurationError::EmptyFleet);
        }
        let workers = fleet.len();
        let worker_count = u64::try_from(workers).unwrap_or(u64::MAX);

        let minimum = worker_count.saturating_mul(MIN_REQUESTS_PER_WORKER);
        if params.total_requests < minimum {
            return Err(ConfigurationError::TooFewRequests {
                requests: params.total_requests,
                workers,
                minimum,
            });
        }
        if params.total_concurrency < worker_count {
            return Err(ConfigurationError::ConcurrencyBelowFleet {
                concurrency: params.total_concurrency,
                workers,
            });
        }
        if params.total_concurrency > params.total_requests {
            return Err(ConfigurationError::ConcurrencyAboveRequests {
                concurrency: params.total_concurrency,
                requests: params.total_requests,
            });
        }
        if params.timeout.is_zero() {
            return Err(ConfigurationError::ZeroTimeout);
        }
        let url = url::Url::parse(&params.url).map_err(|err| ConfigurationError::InvalidUrl {
            url: params.url.clone(),
            reason: err.to_string(),
        })?;

        let requests = params.total_requests.checked_div(worker_count).unwrap_or(0);
        let concurrency = params
            .total_concurrency
            .checked_div(worker_count)
            .unwrap_or(0);

        Ok(Self {
            assignment: WorkerAssignment {
                url: url.to_string(),
                requests,
                concurrency,
                headers: params.headers.clone(),
            },
            workers,
            timeout: params.timeout,
            undispatched_requests: params.total_requests.checked_rem(worker_count).unwrap_or(0),
            undispatched_concurrency: params
                .total_concurrency
                .checked_rem(worker_count)
                .unwrap_or(0),
        })
    }

    #[must_use]
    pub const fn assignment(&self) -> &WorkerAssignment {
        &self.assignment
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Requests dropped by the even split (`total mod workers`).
    #[must_use]
    pub const fn undispatched_requests(&self) -> u64 {
        self.undispatched_requests
    }

    /// Concurrency dropped by the even split (`total mod workers`).
    #[must_use]
    pub const fn undispatched_concurrency(&self) -> u64 {
        self.undispatched_concurrency
    }
}
