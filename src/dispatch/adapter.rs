use async_trait::async_trait;

use crate::domain::{Sample, WorkerEndpoint};
use crate::error::WorkerError;

use super::WorkerAssignment;

/// Runs one benchmark slice on one remote worker.
///
/// Implementations own the transport and the parsing of whatever the
/// benchmarking tool prints; only a typed [`Sample`] or a classified
/// [`WorkerError`] crosses back into the dispatcher.
#[async_trait]
pub trait WorkerAdapter: Send + Sync + 'static {
    /// # Errors
    ///
    /// Returns an error when the worker cannot be reached or its run does
    /// not produce a usable summary.
    async fn run(
        &self,
        endpoint: &WorkerEndpoint,
        assignment: &WorkerAssignment,
    ) -> Result<Sample, WorkerError>;
}
