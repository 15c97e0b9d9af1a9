use serde::Serialize;

use super::Sample;

/// Outcome of one dispatched worker task. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum WorkerResult {
    Completed(Sample),
    Timeout,
    TransportError(String),
}

impl WorkerResult {
    #[must_use]
    pub const fn sample(&self) -> Option<&Sample> {
        match self {
            WorkerResult::Completed(sample) => Some(sample),
            WorkerResult::Timeout | WorkerResult::TransportError(_) => None,
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, WorkerResult::Completed(_))
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            WorkerResult::Completed(_) => "completed",
            WorkerResult::Timeout => "timeout",
            WorkerResult::TransportError(_) => "transport-error",
        }
    }
}
