use thiserror::Error;

use super::SampleError;

/// How a failed worker run is recorded in the attack results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The worker could not be reached or refused our credentials.
    Transport,
    /// The worker ran but produced no usable benchmark summary.
    Timeout,
}

/// Failures reported by a worker adapter.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Connection error to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Gave up connecting to {addr} after {attempts} attempt(s): {source}")]
    ConnectExhausted {
        addr: String,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("Worker {addr} rejected credentials: {message}")]
    Authentication { addr: String, message: String },
    #[error("I/O error during {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Lost the worker while waiting for its report: {source}")]
    ReadReport {
        #[source]
        source: std::io::Error,
    },
    #[error("Worker closed the connection without a report.")]
    EmptyReport,
    #[error("Worker report exceeded max size ({max_bytes} bytes).")]
    ReportTooLarge { max_bytes: usize },
    #[error("Worker report was not valid UTF-8: {source}")]
    ReportInvalidUtf8 {
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("Serialization error during {context}: {source}")]
    Serialize {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not parse worker report: {source}")]
    UnparseableReport {
        #[source]
        source: serde_json::Error,
    },
    #[error("Worker report carried an invalid sample: {source}")]
    InvalidSample {
        #[source]
        source: SampleError,
    },
    #[error("Benchmark failed on worker: {message}")]
    Remote { message: String },
    #[error("Unexpected reply from worker: {kind}")]
    UnexpectedReply { kind: &'static str },
}

impl WorkerError {
    /// Reachability and credential problems are transport failures; anything
    /// after the worker accepted the job means no usable summary came back.
    #[must_use]
    pub const fn classify(&self) -> FailureClass {
        match self {
            WorkerError::Connection { .. }
            | WorkerError::ConnectExhausted { .. }
            | WorkerError::Authentication { .. }
            | WorkerError::Io { .. }
            | WorkerError::Serialize { .. } => FailureClass::Transport,
            WorkerError::ReadReport { .. }
            | WorkerError::EmptyReport
            | WorkerError::ReportTooLarge { .. }
            | WorkerError::ReportInvalidUtf8 { .. }
            | WorkerError::UnparseableReport { .. }
            | WorkerError::InvalidSample { .. }
            | WorkerError::Remote { .. }
            | WorkerError::UnexpectedReply { .. } => FailureClass::Timeout,
        }
    }
}

impl From<SampleError> for WorkerError {
    fn from(source: SampleError) -> Self {
        WorkerError::InvalidSample { source }
    }
}
