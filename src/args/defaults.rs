/// Total requests when neither the CLI nor the config file says otherwise.
pub(super) const DEFAULT_REQUESTS: u64 = 1000;
pub(super) const DEFAULT_CONCURRENCY: u64 = 100;
/// Per-worker deadline; a worker still running after this is timed out.
pub(super) const DEFAULT_TIMEOUT: &str = "5m";
pub(super) const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;
/// Per-attempt TCP connect limit.
pub(super) const DEFAULT_CONNECT_TIMEOUT: &str = "10s";
