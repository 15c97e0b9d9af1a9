use serde::Serialize;

use crate::aggregate::{AggregateOptions, PercentileAlgorithm, aggregate};
use crate::dispatch::AttackPlan;
use crate::domain::{AggregateReport, FleetDirectory, ThresholdConfig, WorkerResult};
use crate::verdict::{Assessment, Verdict, assess, evaluate};

/// One worker's resolved result, labelled with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerOutcome {
    pub worker_id: String,
    pub address: String,
    pub result: WorkerResult,
}

/// The full result of one attack, as handed to the reporters.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub url: String,
    pub algorithm: PercentileAlgorithm,
    pub report: AggregateReport,
    /// `None` when no thresholds were configured.
    pub verdict: Option<Verdict>,
    /// `None` when no worker completed.
    pub assessment: Option<Assessment>,
    /// In fleet order.
    pub workers: Vec<WorkerOutcome>,
    pub undispatched_requests: u64,
    pub undispatched_concurrency: u64,
}

impl AttackOutcome {
    /// Aggregates `results`, then evaluates and assesses the report.
    /// `results` must line up with `fleet`, as returned by the dispatcher.
    #[must_use]
    pub fn build(
        fleet: &FleetDirectory,
        plan: &AttackPlan,
        results: Vec<WorkerResult>,
        options: &AggregateOptions,
        thresholds: &ThresholdConfig,
    ) -> Self {
        let report = aggregate(&results, options);
        let verdict = evaluate(&report, thresholds);
        let assessment =
            (report.num_completed > 0).then(|| assess(report.mean_time_per_request_ms));
        let workers = fleet
            .iter()
            .zip(results)
            .map(|(endpoint, result)| WorkerOutcome {
                worker_id: endpoint.worker_id.clone(),
                address: endpoint.address.clone(),
                result,
            })
            .collect();

        Self {
            url: plan.assignment().url.clone(),
            algorithm: options.algorithm,
            report,
            verdict,
            assessment,
            workers,
            undispatched_requests: plan.undispatched_requests(),
            undispatched_concurrency: plan.undispatched_concurrency(),
        }
    }

    /// The value handed back to the invoking process. An attack without
    /// thresholds counts as accepted.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.verdict.is_none_or(Verdict::is_accepted)
    }
}
