mod app;
mod config;
mod configuration;
mod output;
mod sample;
mod validation;
mod worker;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use configuration::ConfigurationError;
pub use output::OutputError;
pub use sample::SampleError;
pub use validation::ValidationError;
pub use worker::{FailureClass, WorkerError};
