use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::parsers::check_threshold;
use crate::args::{AttackArgs, parse_header};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Fills every argument not given explicitly on the command line from
/// `config`.
///
/// # Errors
///
/// Returns an error when a config value is out of range or malformed.
pub fn apply_config(
    args: &mut AttackArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = ensure_positive(requests, "requests")?;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive(concurrency, "concurrency")?;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
            );
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers.as_ref()
    {
        args.workers.clone_from(workers);
    }

    if !is_cli(matches, "credential")
        && let Some(credential) = config.credential.clone()
    {
        args.credential = Some(credential);
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout
            .to_duration()
            .map_err(|err| AppError::config(ConfigError::InvalidTimeout { source: err }))?;
    }

    if !is_cli(matches, "connect_attempts")
        && let Some(attempts) = config.connect_attempts
    {
        if attempts == 0 {
            return Err(AppError::config(ConfigError::FieldMustBePositive {
                field: "connect_attempts".to_owned(),
                source: ValidationError::ValueTooSmall { min: 1 },
            }));
        }
        args.connect_attempts = attempts;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(limit) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = limit
            .to_duration()
            .map_err(|err| AppError::config(ConfigError::InvalidTimeout { source: err }))?;
    }

    if let Some(thresholds) = config.thresholds.as_ref() {
        if !is_cli(matches, "max_time_per_request")
            && let Some(bound) = thresholds.max_time_per_request_ms
        {
            args.max_time_per_request = Some(ensure_threshold(bound, "max_time_per_request")?);
        }
        if !is_cli(matches, "min_rps")
            && let Some(bound) = thresholds.min_requests_per_second
        {
            args.min_rps = Some(ensure_threshold(bound, "min_requests_per_second")?);
        }
    }

    if !is_cli(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    if !is_cli(matches, "algorithm")
        && let Some(algorithm) = config.algorithm
    {
        args.algorithm = algorithm;
    }

    if !is_cli(matches, "csv")
        && let Some(csv) = config.csv.as_ref()
    {
        args.csv = Some(PathBuf::from(csv));
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.as_ref()
    {
        args.export_json = Some(PathBuf::from(path));
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive(value: u64, field: &str) -> AppResult<u64> {
    if value == 0 {
        return Err(AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: ValidationError::ValueTooSmall { min: 1 },
        }));
    }
    Ok(value)
}

fn ensure_threshold(value: f64, field: &'static str) -> AppResult<f64> {
    check_threshold(value)
        .map_err(|err| AppError::config(ConfigError::InvalidThreshold { field, source: err }))
}
