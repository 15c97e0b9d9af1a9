//! Combines resolved worker results into one [`AggregateReport`].
//!
//! Counters are plain sums over completed workers. The global latency
//! distribution is rebuilt from each worker's 100-point percentile summary;
//! raw per-request latencies never leave the workers.
mod counters;
mod log_binning;
mod resampling;


use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AggregateReport, Sample, WorkerResult};

pub use log_binning::{LOG_BINS, log_binned_percentiles};
pub use resampling::{FINAL_RESOLUTION, SAMPLE_SIZE, resample_percentiles, resampling_quotas};

/// Global percentile reconstruction strategy.
///
/// The two strategies are not interchangeable: they answer the same question
/// with different approximations and will not agree bit for bit.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PercentileAlgorithm {
    /// Weighted resampling of each worker's percentile points.
    #[default]
    Resampling,
    /// Geometric density binning and cumulative inversion.
    LogBinning,
}

impl PercentileAlgorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PercentileAlgorithm::Resampling => "resampling",
            PercentileAlgorithm::LogBinning => "log-binning",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateOptions {
    pub algorithm: PercentileAlgorithm,
    /// Fixed seed for the resampling RNG; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl AggregateOptions {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Builds the attack report. Must only be called once every dispatched task
/// has resolved.
#[must_use]
pub fn aggregate(results: &[WorkerResult], options: &AggregateOptions) -> AggregateReport {
    let totals = counters::tally(results);
    let samples: Vec<&Sample> = results.iter().filter_map(WorkerResult::sample).collect();

    let global_latency_percentiles = match options.algorithm {
        PercentileAlgorithm::Resampling => {
            let mut rng = options.rng();
            resample_percentiles(&samples, &mut rng)
        }
        PercentileAlgorithm::LogBinning => log_binned_percentiles(&samples),
    };
    debug!(
        "Aggregated {} completed worker(s) with {} ({} percentile points)",
        samples.len(),
        options.algorithm.as_str(),
        global_latency_percentiles.len()
    );

    totals.into_report(global_latency_percentiles)
}
