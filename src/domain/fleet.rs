use serde::{Deserialize, Serialize};

/// One entry from the fleet directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerEndpoint {
    pub worker_id: String,
    pub address: String,
    /// Opaque reference handed to the adapter (key name, token id, ...).
    #[serde(default)]
    pub credential: Option<String>,
}

impl WorkerEndpoint {
    pub fn new(worker_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            address: address.into(),
            credential: None,
        }
    }

    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

/// Ordered workers for a single attack invocation. Order is significant:
/// results and per-worker report columns follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetDirectory {
    workers: Vec<WorkerEndpoint>,
}

impl FleetDirectory {
    #[must_use]
    pub const fn new(workers: Vec<WorkerEndpoint>) -> Self {
        Self { workers }
    }

    /// Builds a fleet from bare addresses, naming workers `worker-<index>`.
    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let workers = addresses
            .into_iter()
            .enumerate()
            .map(|(idx, address)| WorkerEndpoint::new(format!("worker-{}", idx), address))
            .collect();
        Self { workers }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    #[must_use]
    pub fn workers(&self) -> &[WorkerEndpoint] {
        &self.workers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkerEndpoint> {
        self.workers.iter()
    }
}
