use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::{FleetDirectory, WorkerEndpoint, WorkerResult};
use crate::error::{ConfigurationError, FailureClass};
use crate::shutdown::ShutdownReceiver;

use super::{AttackParameters, AttackPlan, WorkerAdapter, WorkerAssignment};

/// Detail recorded for workers that had not reported when the attack was
/// cancelled.
pub const CANCELLED_DETAIL: &str = "cancelled";

/// Validates the attack against the fleet, then runs one slice per worker.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] before any worker is contacted when the
/// parameters do not fit the fleet. Per-worker failures never surface here;
/// they are recorded in the returned results.
pub async fn run_attack_slices<A>(
    fleet: &FleetDirectory,
    params: &AttackParameters,
    adapter: Arc<A>,
    shutdown: Option<ShutdownReceiver>,
) -> Result<(AttackPlan, Vec<WorkerResult>), ConfigurationError>
where
    A: WorkerAdapter + ?Sized,
{
    let plan = AttackPlan::new(params, fleet)?;
    let results = dispatch(fleet, &plan, adapter, shutdown).await;
    Ok((plan, results))
}

/// Runs exactly one task per worker, all at once, and waits for every task to
/// resolve. The result at index `i` belongs to `fleet.workers()[i]`.
///
/// A shutdown signal abandons the tasks still running; their slots become
/// [`WorkerResult::TransportError`] with [`CANCELLED_DETAIL`].
pub async fn dispatch<A>(
    fleet: &FleetDirectory,
    plan: &AttackPlan,
    adapter: Arc<A>,
    mut shutdown: Option<ShutdownReceiver>,
) -> Vec<WorkerResult>
where
    A: WorkerAdapter + ?Sized,
{
    let assignment = plan.assignment();
    info!(
        "Each of {} worker(s) will fire {} request(s), {} at a time.",
        fleet.len(),
        assignment.requests,
        assignment.concurrency
    );

    let mut handles: Vec<JoinHandle<WorkerResult>> = fleet
        .iter()
        .map(|endpoint| {
            tokio::spawn(run_worker(
                Arc::clone(&adapter),
                endpoint.clone(),
                assignment.clone(),
                plan.timeout(),
            ))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    let mut cancelled = false;
    for (endpoint, handle) in fleet.iter().zip(handles.iter_mut()) {
        if cancelled && !handle.is_finished() {
            handle.abort();
            results.push(WorkerResult::TransportError(CANCELLED_DETAIL.to_owned()));
            continue;
        }
        match await_worker(handle, &mut shutdown).await {
            Some(Ok(result)) => results.push(result),
            Some(Err(err)) => {
                warn!("Worker {} task failed: {}", endpoint.worker_id, err);
                results.push(WorkerResult::TransportError(format!(
                    "worker task failed: {}",
                    err
                )));
            }
            None => {
                warn!("Attack cancelled; abandoning workers still in flight.");
                cancelled = true;
                handle.abort();
                results.push(WorkerResult::TransportError(CANCELLED_DETAIL.to_owned()));
            }
        }
    }

    let completed = results.iter().filter(|r| r.is_completed()).count();
    let timed_out = results
        .iter()
        .filter(|r| matches!(r, WorkerResult::Timeout))
        .count();
    info!(
        "Offensive complete: {} completed, {} timed out, {} unreachable.",
        completed,
        timed_out,
        results
            .len()
            .saturating_sub(completed)
            .saturating_sub(timed_out)
    );
    results
}

/// `None` when the shutdown signal fired first.
async fn await_worker(
    handle: &mut JoinHandle<WorkerResult>,
    shutdown: &mut Option<ShutdownReceiver>,
) -> Option<Result<WorkerResult, tokio::task::JoinError>> {
    loop {
        let Some(receiver) = shutdown.as_mut() else {
            return Some(handle.await);
        };
        tokio::select! {
            joined = &mut *handle => return Some(joined),
            signal = receiver.recv() => match signal {
                Ok(()) | Err(RecvError::Lagged(_)) => return None,
                Err(RecvError::Closed) => {
                    *shutdown = None;
                }
            },
        }
    }
}

async fn run_worker<A>(
    adapter: Arc<A>,
    endpoint: WorkerEndpoint,
    assignment: WorkerAssignment,
    timeout: Duration,
) -> WorkerResult
where
    A: WorkerAdapter + ?Sized,
{
    info!(
        "Worker {} ({}) is joining the swarm.",
        endpoint.worker_id, endpoint.address
    );
    let outcome = tokio::time::timeout(timeout, adapter.run(&endpoint, &assignment)).await;
    match outcome {
        Ok(Ok(sample)) => match sample.validate() {
            Ok(()) => {
                info!("Worker {} is out of ammo.", endpoint.worker_id);
                WorkerResult::Completed(sample)
            }
            Err(err) => {
                warn!(
                    "Worker {} returned an unusable summary: {}",
                    endpoint.worker_id, err
                );
                WorkerResult::Timeout
            }
        },
        Ok(Err(err)) => match err.classify() {
            FailureClass::Transport => {
                warn!(
                    "Worker {} didn't make it to the action: {}",
                    endpoint.worker_id, err
                );
                WorkerResult::TransportError(err.to_string())
            }
            FailureClass::Timeout => {
                warn!(
                    "Worker {} lost sight of the target: {}",
                    endpoint.worker_id, err
                );
                WorkerResult::Timeout
            }
        },
        Err(_) => {
            warn!(
                "Worker {} did not report within {}ms.",
                endpoint.worker_id,
                timeout.as_millis()
            );
            WorkerResult::Timeout
        }
    }
}
