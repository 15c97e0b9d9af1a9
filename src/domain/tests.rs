use super::test_support::{linear_percentiles, linear_sample};
use super::*;
use crate::error::SampleError;

#[test]
fn percentiles_reject_wrong_length() -> Result<(), String> {
    match LatencyPercentiles::try_from(vec![1.0; 99]) {
        Err(SampleError::WrongPercentileCount {
            expected: 100,
            actual: 99,
        }) => Ok(()),
        other => Err(format!("Unexpected result: {:?}", other)),
    }
}

#[test]
fn percentiles_reject_decreasing_values() -> Result<(), String> {
    let mut values = vec![5.0; PERCENTILE_POINTS];
    if let Some(slot) = values.get_mut(40) {
        *slot = 4.0;
    }
    match LatencyPercentiles::try_from(values) {
        Err(SampleError::DecreasingLatency { index: 40, .. }) => Ok(()),
        other => Err(format!("Unexpected result: {:?}", other)),
    }
}

#[test]
fn percentiles_reject_non_finite_values() -> Result<(), String> {
    let mut values = vec![1.0; PERCENTILE_POINTS];
    if let Some(slot) = values.get_mut(0) {
        *slot = f64::NAN;
    }
    match LatencyPercentiles::try_from(values) {
        Err(SampleError::InvalidLatency { index: 0, .. }) => Ok(()),
        other => Err(format!("Unexpected result: {:?}", other)),
    }
}

#[test]
fn percentiles_expose_bounds() -> Result<(), String> {
    let latency = linear_percentiles(10.0, 109.0)?;
    if (latency.min() - 10.0).abs() > 1e-9 {
        return Err(format!("Unexpected min: {}", latency.min()));
    }
    if (latency.max() - 109.0).abs() > 1e-9 {
        return Err(format!("Unexpected max: {}", latency.max()));
    }
    if latency.get(PERCENTILE_POINTS).is_some() {
        return Err("Expected out-of-range index to be None".to_owned());
    }
    Ok(())
}

#[test]
fn sample_deserializes_from_worker_json() -> Result<(), String> {
    let latency: Vec<f64> = (1..=100).map(f64::from).collect();
    let payload = serde_json::json!({
        "complete_requests": 1000,
        "failed_requests": { "connect": 1, "receive": 2, "length": 3, "exceptions": 4 },
        "response_codes": { "2xx": 990, "5xx": 10 },
        "requests_per_second": 250.5,
        "mean_time_per_request_ms": 39.9,
        "latency_percentiles": latency,
    });
    let sample: Sample =
        serde_json::from_value(payload).map_err(|err| format!("Deserialize failed: {}", err))?;
    if sample.failed_requests.total() != 10 {
        return Err(format!(
            "Unexpected failed total: {}",
            sample.failed_requests.total()
        ));
    }
    if sample.response_codes.success != 990 || sample.response_codes.server_error != 10 {
        return Err(format!(
            "Unexpected response codes: {:?}",
            sample.response_codes
        ));
    }
    if sample.response_codes.redirect != 0 {
        return Err("Expected missing 3xx to default to zero".to_owned());
    }
    sample.validate().map_err(|err| err.to_string())
}

#[test]
fn sample_deserialization_rejects_short_percentile_list() -> Result<(), String> {
    let payload = serde_json::json!({
        "complete_requests": 10,
        "requests_per_second": 1.0,
        "mean_time_per_request_ms": 1.0,
        "latency_percentiles": [1.0, 2.0, 3.0],
    });
    if serde_json::from_value::<Sample>(payload).is_ok() {
        return Err("Expected short percentile list to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn sample_validate_rejects_negative_throughput() -> Result<(), String> {
    let mut sample = linear_sample(10, 1.0, 2.0)?;
    sample.requests_per_second = -1.0;
    match sample.validate() {
        Err(SampleError::InvalidMetric {
            field: "requests_per_second",
            ..
        }) => Ok(()),
        other => Err(format!("Unexpected result: {:?}", other)),
    }
}

#[test]
fn failed_requests_add_per_field() -> Result<(), String> {
    let left = FailedRequests {
        connect: 1,
        receive: 2,
        length: 3,
        exceptions: 4,
    };
    let sum = left.saturating_add(left);
    let expected = FailedRequests {
        connect: 2,
        receive: 4,
        length: 6,
        exceptions: 8,
    };
    if sum != expected {
        return Err(format!("Unexpected sum: {:?}", sum));
    }
    Ok(())
}

#[test]
fn fleet_from_addresses_names_workers_in_order() -> Result<(), String> {
    let fleet = FleetDirectory::from_addresses(["10.0.0.1:7000", "10.0.0.2:7000"]);
    let ids: Vec<&str> = fleet.iter().map(|w| w.worker_id.as_str()).collect();
    if ids != ["worker-0", "worker-1"] {
        return Err(format!("Unexpected ids: {:?}", ids));
    }
    if fleet.len() != 2 || fleet.is_empty() {
        return Err("Unexpected fleet size".to_owned());
    }
    Ok(())
}

#[test]
fn worker_result_exposes_sample_only_when_completed() -> Result<(), String> {
    let completed = WorkerResult::Completed(linear_sample(5, 1.0, 2.0)?);
    if completed.sample().is_none() || !completed.is_completed() {
        return Err("Expected completed result to carry a sample".to_owned());
    }
    let failed = WorkerResult::TransportError("refused".to_owned());
    if failed.sample().is_some() || failed.label() != "transport-error" {
        return Err("Unexpected transport error view".to_owned());
    }
    if WorkerResult::Timeout.label() != "timeout" {
        return Err("Unexpected timeout label".to_owned());
    }
    Ok(())
}

#[test]
fn report_named_percentiles_follow_index_convention() -> Result<(), String> {
    let report = AggregateReport {
        total_complete_requests: 1,
        total_failed_requests: 0,
        failed_requests: FailedRequests::default(),
        response_codes: ResponseCodes::default(),
        mean_requests_per_second: 1.0,
        mean_time_per_request_ms: 1.0,
        global_latency_percentiles: (1..=100).map(f64::from).collect(),
        num_completed: 1,
        num_timeout: 2,
        num_transport_error: 3,
    };
    if report.p50() != Some(50.0) || report.p90() != Some(90.0) || report.p99() != Some(99.0) {
        return Err(format!(
            "Unexpected named percentiles: {:?} {:?} {:?}",
            report.p50(),
            report.p90(),
            report.p99()
        ));
    }
    if report.dispatched_workers() != 6 {
        return Err("Unexpected dispatched worker count".to_owned());
    }
    Ok(())
}

#[test]
fn thresholds_parse_from_toml_aliases() -> Result<(), String> {
    let config: ThresholdConfig =
        toml::from_str("tpr = 500.0\nrps = 50.0\n").map_err(|err| err.to_string())?;
    if !config.is_configured() {
        return Err("Expected thresholds to be configured".to_owned());
    }
    if ThresholdConfig::default().is_configured() {
        return Err("Expected default thresholds to be unset".to_owned());
    }
    Ok(())
}
