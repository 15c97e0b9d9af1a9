use serde::Deserialize;

/// A worker as given on the command line (`[id=]host:port`) or in a
/// `[[workers]]` config table. Unnamed workers are numbered by position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkerSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub credential: Option<String>,
}
