use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::dispatch::{
    BackoffPolicy, PollExhausted, WorkerAdapter, WorkerAssignment, poll_with_backoff,
};
use crate::domain::{Sample, WorkerEndpoint};
use crate::error::WorkerError;

use super::protocol::{
    AttackMessage, ErrorMessage, RemoteErrorKind, WireMessage, read_message, send_message,
};

/// Per-attempt connect limit when none is configured.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to workers listening on `endpoint.address` (a `host:port`).
///
/// Every connect attempt is bounded by `connect_timeout`, and the whole
/// connect phase by `connect_policy.deadline`, so a host that never completes
/// the handshake resolves as unreachable instead of hanging.
#[derive(Debug, Clone)]
pub struct TcpWorkerAdapter {
    connect_policy: BackoffPolicy,
    connect_timeout: Duration,
}

impl Default for TcpWorkerAdapter {
    fn default() -> Self {
        Self::new(BackoffPolicy::default(), DEFAULT_CONNECT_TIMEOUT)
    }
}

impl TcpWorkerAdapter {
    #[must_use]
    pub const fn new(connect_policy: BackoffPolicy, connect_timeout: Duration) -> Self {
        Self {
            connect_policy,
            connect_timeout,
        }
    }

    async fn connect(&self, address: &str) -> Result<TcpStream, WorkerError> {
        let attempt_timeout = self.connect_timeout;
        let mut attempts_made = 0u32;
        let polling = poll_with_backoff(&self.connect_policy, |attempt| {
            attempts_made = attempt;
            debug!("Connecting to worker {} (attempt {})", address, attempt);
            connect_once(address, attempt_timeout)
        });

        let outcome = if let Some(deadline) = self.connect_policy.deadline {
            let bounded = tokio::time::timeout(deadline, polling).await;
            bounded.unwrap_or_else(|_| {
                Err(PollExhausted {
                    attempts: attempts_made.max(1),
                    last_error: timed_out(deadline),
                })
            })
        } else {
            polling.await
        };

        outcome.map_err(|exhausted| {
            if exhausted.attempts > 1 {
                WorkerError::ConnectExhausted {
                    addr: address.to_owned(),
                    attempts: exhausted.attempts,
                    source: exhausted.last_error,
                }
            } else {
                WorkerError::Connection {
                    addr: address.to_owned(),
                    source: exhausted.last_error,
                }
            }
        })
    }
}

async fn connect_once(address: &str, limit: Duration) -> io::Result<TcpStream> {
    match tokio::time::timeout(limit, TcpStream::connect(address)).await {
        Ok(connected) => connected,
        Err(_) => Err(timed_out(limit)),
    }
}

fn timed_out(limit: Duration) -> io::Error {
    io::Error::new(
        io::ErrorKind::TimedOut,
        format!("no connection within {}ms", limit.as_millis()),
    )
}

#[async_trait]
impl WorkerAdapter for TcpWorkerAdapter {
    async fn run(
        &self,
        endpoint: &WorkerEndpoint,
        assignment: &WorkerAssignment,
    ) -> Result<Sample, WorkerError> {
        let stream = self.connect(&endpoint.address).await?;
        info!("Connected to worker {}", endpoint.address);
        let (read_half, mut write_half) = stream.into_split();

        let request = WireMessage::Attack(AttackMessage {
            worker_id: endpoint.worker_id.clone(),
            credential: endpoint.credential.clone(),
            assignment: assignment.clone(),
        });
        send_message(&mut write_half, &request).await?;

        let mut reader = BufReader::new(read_half);
        match read_message(&mut reader).await? {
            WireMessage::Report(report) => {
                if report.worker_id != endpoint.worker_id {
                    debug!(
                        "Worker {} reported under id {}",
                        endpoint.worker_id, report.worker_id
                    );
                }
                report.sample.validate()?;
                Ok(report.sample)
            }
            WireMessage::Error(ErrorMessage { message, kind }) => match kind {
                RemoteErrorKind::Auth => Err(WorkerError::Authentication {
                    addr: endpoint.address.clone(),
                    message,
                }),
                RemoteErrorKind::Benchmark => Err(WorkerError::Remote { message }),
            },
            other @ WireMessage::Attack(_) => Err(WorkerError::UnexpectedReply { kind: other.kind() }),
        }
    }
}
