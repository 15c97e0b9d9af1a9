use std::time::Duration;

use crate::error::ValidationError;

use super::types::WorkerSpec;

pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        Some(_) | None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

/// `host:port` or `id=host:port`.
pub(super) fn parse_worker(s: &str) -> Result<WorkerSpec, ValidationError> {
    let invalid = || ValidationError::InvalidWorkerFormat {
        value: s.to_owned(),
    };
    let (id, address) = match s.split_once('=') {
        Some((id, address)) => {
            let id = id.trim();
            if id.is_empty() {
                return Err(invalid());
            }
            check_worker_id(id)?;
            (Some(id.to_owned()), address.trim())
        }
        None => (None, s.trim()),
    };
    if address.is_empty() {
        return Err(invalid());
    }
    Ok(WorkerSpec {
        id,
        address: address.to_owned(),
        credential: None,
    })
}

/// Worker ids become CSV column names and must not break the row layout.
pub(crate) fn check_worker_id(id: &str) -> Result<(), ValidationError> {
    if id.contains([',', '"', '\n', '\r']) {
        return Err(ValidationError::InvalidWorkerId { id: id.to_owned() });
    }
    Ok(())
}

pub(super) fn parse_positive_u64(s: &str) -> Result<u64, ValidationError> {
    let value: u64 = s
        .trim()
        .parse()
        .map_err(|err| ValidationError::InvalidNumber { source: err })?;
    if value == 0 {
        return Err(ValidationError::ValueTooSmall { min: 1 });
    }
    Ok(value)
}

/// Threshold bounds are finite and strictly positive.
pub(crate) fn parse_threshold(s: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::InvalidThreshold {
        value: s.to_owned(),
    };
    let value: f64 = s.trim().parse().map_err(|_| invalid())?;
    check_threshold(value).map_err(|_| invalid())
}

pub(crate) fn check_threshold(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidThreshold {
            value: value.to_string(),
        })
    }
}

pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let seconds_per_unit: u64 = match if unit_part.is_empty() { "s" } else { unit_part } {
        "ms" => return non_zero(Duration::from_millis(number)),
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        unit => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };
    let secs = number
        .checked_mul(seconds_per_unit)
        .ok_or(ValidationError::DurationOverflow)?;
    non_zero(Duration::from_secs(secs))
}

fn non_zero(duration: Duration) -> Result<Duration, ValidationError> {
    if duration.is_zero() {
        Err(ValidationError::DurationZero)
    } else {
        Ok(duration)
    }
}
