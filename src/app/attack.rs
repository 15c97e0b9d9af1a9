use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::aggregate::AggregateOptions;
use crate::args::AttackArgs;
use crate::args::parsers::check_worker_id;
use crate::dispatch::{AttackParameters, BackoffPolicy, WorkerAdapter, run_attack_slices};
use crate::domain::{FleetDirectory, ThresholdConfig, WorkerEndpoint};
use crate::error::{AppResult, ValidationError};
use crate::report::{AttackOutcome, export_json, print_summary, write_comparison_csv};
use crate::shutdown::ShutdownReceiver;

/// A fully resolved `swarm attack` invocation.
#[derive(Debug, Clone)]
pub struct AttackRequest {
    pub fleet: FleetDirectory,
    pub parameters: AttackParameters,
    pub options: AggregateOptions,
    pub thresholds: ThresholdConfig,
    pub connect_policy: BackoffPolicy,
    /// Limit for one connection attempt, never longer than the connect phase.
    pub connect_timeout: Duration,
    pub csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl AttackRequest {
    /// Resolves CLI arguments (already merged with any config file).
    /// Workers without an id are named `worker-<position>`; workers without
    /// a credential inherit `--credential`. Connecting may take at most half
    /// of the per-worker timeout, so an unreachable worker is reported as
    /// such before its task times out.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing, a worker address is empty,
    /// or a worker id is unusable or shared by two workers.
    pub fn from_args(args: &AttackArgs) -> Result<Self, ValidationError> {
        let url = args.url.clone().ok_or(ValidationError::MissingUrl)?;

        let mut seen = HashSet::new();
        let mut workers = Vec::with_capacity(args.workers.len());
        for (index, spec) in args.workers.iter().enumerate() {
            if spec.address.trim().is_empty() {
                return Err(ValidationError::EmptyWorkerAddress { index });
            }
            let worker_id = spec
                .id
                .clone()
                .unwrap_or_else(|| format!("worker-{}", index));
            check_worker_id(&worker_id)?;
            if !seen.insert(worker_id.clone()) {
                return Err(ValidationError::DuplicateWorkerId { id: worker_id });
            }
            let mut endpoint = WorkerEndpoint::new(worker_id, spec.address.trim());
            if let Some(credential) = spec.credential.as_ref().or(args.credential.as_ref()) {
                endpoint = endpoint.with_credential(credential.clone());
            }
            workers.push(endpoint);
        }

        let connect_deadline = args.timeout / 2;
        Ok(Self {
            fleet: FleetDirectory::new(workers),
            parameters: AttackParameters {
                url,
                total_requests: args.requests,
                total_concurrency: args.concurrency,
                headers: args.headers.clone(),
                timeout: args.timeout,
            },
            options: AggregateOptions {
                algorithm: args.algorithm,
                seed: args.seed,
            },
            thresholds: ThresholdConfig {
                max_time_per_request_ms: args.max_time_per_request,
                min_requests_per_second: args.min_rps,
            },
            connect_policy: BackoffPolicy {
                max_attempts: args.connect_attempts.max(1),
                deadline: Some(connect_deadline),
                ..BackoffPolicy::default()
            },
            connect_timeout: args.connect_timeout.min(connect_deadline),
            csv: args.csv.clone(),
            export_json: args.export_json.clone(),
        })
    }
}

/// Dispatches the attack, waits for every worker, and evaluates the result.
///
/// # Errors
///
/// Returns an error only when the attack parameters do not fit the fleet;
/// nothing is dispatched in that case.
pub async fn run_attack<A>(
    request: &AttackRequest,
    adapter: Arc<A>,
    shutdown: Option<ShutdownReceiver>,
) -> AppResult<AttackOutcome>
where
    A: WorkerAdapter + ?Sized,
{
    info!(
        "Assembling {} worker(s) to attack {}",
        request.fleet.len(),
        request.parameters.url
    );
    let (plan, results) =
        run_attack_slices(&request.fleet, &request.parameters, adapter, shutdown).await?;
    Ok(AttackOutcome::build(
        &request.fleet,
        &plan,
        results,
        &request.options,
        &request.thresholds,
    ))
}

/// Prints the summary and writes the requested artifacts.
///
/// # Errors
///
/// Returns an error when an artifact cannot be written.
pub async fn report_outcome(request: &AttackRequest, outcome: &AttackOutcome) -> AppResult<()> {
    print_summary(outcome);
    if let Some(path) = request.csv.as_ref() {
        write_comparison_csv(path, outcome).await?;
        info!("Wrote percentile comparison to {}", path.display());
    }
    if let Some(path) = request.export_json.as_ref() {
        export_json(path, outcome).await?;
        info!("Wrote JSON report to {}", path.display());
    }
    Ok(())
}
