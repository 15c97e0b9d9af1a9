use std::time::Duration;

use serde::Deserialize;

use crate::aggregate::PercentileAlgorithm;
use crate::args::{WorkerSpec, parse_duration_arg};
use crate::domain::ThresholdConfig;
use crate::error::ValidationError;

/// Everything `swarm attack` accepts, as read from `swarm.toml`/`swarm.json`.
/// Every field is optional; CLI flags given explicitly take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    #[serde(alias = "number")]
    pub requests: Option<u64>,
    pub concurrency: Option<u64>,
    pub headers: Option<Vec<String>>,
    pub timeout: Option<DurationValue>,
    pub connect_attempts: Option<u32>,
    pub connect_timeout: Option<DurationValue>,
    /// Fallback credential for workers without their own.
    pub credential: Option<String>,
    pub seed: Option<u64>,
    pub algorithm: Option<PercentileAlgorithm>,
    pub csv: Option<String>,
    pub export_json: Option<String>,
    pub thresholds: Option<ThresholdConfig>,
    pub workers: Option<Vec<WorkerSpec>>,
}

/// Either a bare number of seconds or a duration string such as `"90s"`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
