use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::dispatch::WorkerAssignment;
use crate::domain::Sample;
use crate::error::WorkerError;

/// Longest accepted line, newline included.
pub const MAX_MESSAGE_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireMessage {
    Attack(AttackMessage),
    Report(Box<ReportMessage>),
    Error(ErrorMessage),
}

impl WireMessage {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            WireMessage::Attack(_) => "attack",
            WireMessage::Report(_) => "report",
            WireMessage::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackMessage {
    pub worker_id: String,
    #[serde(default)]
    pub credential: Option<String>,
    pub assignment: WorkerAssignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMessage {
    pub worker_id: String,
    pub sample: Sample,
}

/// Why a worker refused or abandoned the job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    /// The credential reference was rejected.
    Auth,
    #[default]
    Benchmark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
    #[serde(default)]
    pub kind: RemoteErrorKind,
}

/// Reads one message line, refusing lines longer than [`MAX_MESSAGE_BYTES`].
///
/// # Errors
///
/// Returns an error when the peer closes before a full line arrives, the
/// line is oversized, or it is not a valid message.
pub async fn read_message<R>(reader: &mut R) -> Result<WireMessage, WorkerError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buffer: Vec<u8> = Vec::with_capacity(1024);
    let limit = u64::try_from(MAX_MESSAGE_BYTES).unwrap_or(u64::MAX);
    let bytes = (&mut *reader)
        .take(limit.saturating_add(1))
        .read_until(b'\n', &mut buffer)
        .await
        .map_err(|err| WorkerError::ReadReport { source: err })?;
    if bytes == 0 {
        return Err(WorkerError::EmptyReport);
    }
    if buffer.len() > MAX_MESSAGE_BYTES {
        return Err(WorkerError::ReportTooLarge {
            max_bytes: MAX_MESSAGE_BYTES,
        });
    }
    if buffer.ends_with(b"\n") {
        buffer.pop();
        if buffer.ends_with(b"\r") {
            buffer.pop();
        }
    }
    let line = std::str::from_utf8(&buffer)
        .map_err(|err| WorkerError::ReportInvalidUtf8 { source: err })?;
    serde_json::from_str::<WireMessage>(line)
        .map_err(|err| WorkerError::UnparseableReport { source: err })
}

/// Writes `message` as one JSON line and flushes it.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
pub async fn send_message<W>(writer: &mut W, message: &WireMessage) -> Result<(), WorkerError>
where
    W: AsyncWrite + Unpin,
{
    let mut payload = serde_json::to_string(message).map_err(|err| WorkerError::Serialize {
        context: "wire message",
        source: err,
    })?;
    payload.push('\n');
    writer
        .write_all(payload.as_bytes())
        .await
        .map_err(|err| WorkerError::Io {
            context: "send wire message",
            source: err,
        })?;
    writer.flush().await.map_err(|err| WorkerError::Io {
        context: "flush wire message",
        source: err,
    })
}
