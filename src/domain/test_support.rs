use super::{FailedRequests, LatencyPercentiles, ResponseCodes, Sample, PERCENTILE_POINTS};

/// Evenly spaced latencies from `low` to `high` inclusive.
pub(crate) fn linear_percentiles(low: f64, high: f64) -> Result<LatencyPercentiles, String> {
    let steps = (PERCENTILE_POINTS - 1) as f64;
    let values: Vec<f64> = (0..PERCENTILE_POINTS)
        .map(|idx| low + (high - low) * (idx as f64) / steps)
        .collect();
    LatencyPercentiles::try_from(values).map_err(|err| err.to_string())
}

pub(crate) fn sample(
    complete_requests: u64,
    requests_per_second: f64,
    mean_time_per_request_ms: f64,
    latency: LatencyPercentiles,
) -> Sample {
    Sample {
        complete_requests,
        failed_requests: FailedRequests::default(),
        response_codes: ResponseCodes {
            success: complete_requests,
            ..ResponseCodes::default()
        },
        requests_per_second,
        mean_time_per_request_ms,
        latency_percentiles: latency,
    }
}

pub(crate) fn linear_sample(
    complete_requests: u64,
    low: f64,
    high: f64,
) -> Result<Sample, String> {
    let latency = linear_percentiles(low, high)?;
    Ok(sample(complete_requests, 10.0, (low + high) / 2.0, latency))
}
