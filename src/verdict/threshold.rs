use serde::Serialize;

use crate::domain::{AggregateReport, ThresholdConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Accept,
    Reject,
}

impl Verdict {
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Verdict::Accept)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Verdict::Accept => "accept",
            Verdict::Reject => "reject",
        }
    }
}

/// Compares the report against the configured bounds.
///
/// `None` means nothing was configured and the attack is not evaluated. A
/// report with no completed workers is always rejected.
#[must_use]
pub fn evaluate(report: &AggregateReport, thresholds: &ThresholdConfig) -> Option<Verdict> {
    if report.num_completed == 0 {
        return Some(Verdict::Reject);
    }
    if !thresholds.is_configured() {
        return None;
    }

    let latency_ok = thresholds
        .max_time_per_request_ms
        .is_none_or(|max| report.mean_time_per_request_ms < max);
    let throughput_ok = thresholds
        .min_requests_per_second
        .is_none_or(|min| report.mean_requests_per_second > min);

    if latency_ok && throughput_ok {
        Some(Verdict::Accept)
    } else {
        Some(Verdict::Reject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FailedRequests, ResponseCodes};

    fn report(mean_time_ms: f64, rps: f64, num_completed: usize) -> AggregateReport {
        AggregateReport {
            total_complete_requests: 100,
            total_failed_requests: 0,
            failed_requests: FailedRequests::default(),
            response_codes: ResponseCodes::default(),
            mean_requests_per_second: rps,
            mean_time_per_request_ms: mean_time_ms,
            global_latency_percentiles: Vec::new(),
            num_completed,
            num_timeout: 0,
            num_transport_error: 0,
        }
    }

    fn thresholds(max_time: Option<f64>, min_rps: Option<f64>) -> ThresholdConfig {
        ThresholdConfig {
            max_time_per_request_ms: max_time,
            min_requests_per_second: min_rps,
        }
    }

    #[test]
    fn accepts_when_both_bounds_hold() -> Result<(), String> {
        let verdict = evaluate(
            &report(450.0, 60.0, 3),
            &thresholds(Some(500.0), Some(50.0)),
        );
        if verdict != Some(Verdict::Accept) {
            return Err(format!("Unexpected verdict: {:?}", verdict));
        }
        Ok(())
    }

    #[test]
    fn bounds_are_strict() -> Result<(), String> {
        let at_latency_bound = evaluate(&report(500.0, 60.0, 1), &thresholds(Some(500.0), None));
        if at_latency_bound != Some(Verdict::Reject) {
            return Err("Mean latency equal to the bound must reject".to_owned());
        }
        let at_throughput_bound = evaluate(&report(100.0, 50.0, 1), &thresholds(None, Some(50.0)));
        if at_throughput_bound != Some(Verdict::Reject) {
            return Err("Throughput equal to the bound must reject".to_owned());
        }
        Ok(())
    }

    #[test]
    fn one_failing_bound_rejects() -> Result<(), String> {
        let verdict = evaluate(
            &report(450.0, 40.0, 2),
            &thresholds(Some(500.0), Some(50.0)),
        );
        if verdict != Some(Verdict::Reject) {
            return Err(format!("Unexpected verdict: {:?}", verdict));
        }
        Ok(())
    }

    #[test]
    fn unset_bounds_are_not_evaluated() -> Result<(), String> {
        let verdict = evaluate(&report(9_000.0, 0.1, 1), &ThresholdConfig::default());
        if verdict.is_some() {
            return Err(format!("Expected no verdict, got {:?}", verdict));
        }
        Ok(())
    }

    #[test]
    fn no_completed_workers_forces_reject() -> Result<(), String> {
        for config in [
            ThresholdConfig::default(),
            thresholds(Some(1_000_000.0), None),
        ] {
            let verdict = evaluate(&report(0.0, 0.0, 0), &config);
            if verdict != Some(Verdict::Reject) {
                return Err(format!("Unexpected verdict: {:?}", verdict));
            }
        }
        Ok(())
    }
}
