//! Fans one benchmark slice out to every worker in the fleet and collects an
//! order-preserved [`WorkerResult`](crate::domain::WorkerResult) per worker.
mod adapter;
mod backoff;
mod plan;
mod runner;


pub use adapter::WorkerAdapter;
pub use backoff::{BackoffPolicy, PollExhausted, poll_with_backoff};
pub use plan::{AttackParameters, AttackPlan, WorkerAssignment};
pub use runner::{CANCELLED_DETAIL, dispatch, run_attack_slices};
