//! Data contracts shared by the dispatcher, aggregator and reporters.
mod fleet;
mod report;
mod result;
mod sample;
mod thresholds;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use fleet::{FleetDirectory, WorkerEndpoint};
pub use report::AggregateReport;
pub use result::WorkerResult;
pub use sample::{FailedRequests, LatencyPercentiles, PERCENTILE_POINTS, ResponseCodes, Sample};
pub use thresholds::ThresholdConfig;
