use crate::verdict::Verdict;

use super::AttackOutcome;

pub fn print_summary(outcome: &AttackOutcome) {
    for line in summary_lines(outcome) {
        println!("{}", line);
    }
}

#[must_use]
pub fn summary_lines(outcome: &AttackOutcome) -> Vec<String> {
    let report = &outcome.report;
    let mut lines = Vec::new();
    lines.push(format!("Target: {}", outcome.url));
    lines.push(format!(
        "Workers: {} dispatched, {} completed, {} timed out, {} unreachable",
        report.dispatched_workers(),
        report.num_completed,
        report.num_timeout,
        report.num_transport_error
    ));
    if outcome.undispatched_requests > 0 || outcome.undispatched_concurrency > 0 {
        lines.push(format!(
            "Not dispatched (uneven split): {} request(s), {} concurrency",
            outcome.undispatched_requests, outcome.undispatched_concurrency
        ));
    }

    if report.num_completed == 0 {
        lines.push("No workers completed their mission. The target was not measured.".to_owned());
        lines.push(format!("Verdict: {}", verdict_label(outcome.verdict)));
        return lines;
    }

    let failed = &report.failed_requests;
    lines.push(format!("Complete requests: {}", report.total_complete_requests));
    lines.push(format!(
        "Failed requests: {} (connect: {}, receive: {}, length: {}, exceptions: {})",
        report.total_failed_requests,
        failed.connect,
        failed.receive,
        failed.length,
        failed.exceptions
    ));
    let codes = &report.response_codes;
    lines.push(format!(
        "Response codes: 2xx: {} / 3xx: {} / 4xx: {} / 5xx: {}",
        codes.success, codes.redirect, codes.client_error, codes.server_error
    ));
    lines.push(format!(
        "Requests per second: {:.2} [#/sec] (sum of workers)",
        report.mean_requests_per_second
    ));
    lines.push(format!(
        "Time per request: {:.3} [ms] (mean of workers)",
        report.mean_time_per_request_ms
    ));
    if let (Some(p50), Some(p90), Some(p99)) = (report.p50(), report.p90(), report.p99()) {
        lines.push(format!(
            "P50/P90/P99 responses faster than: {:.3} / {:.3} / {:.3} [ms] ({})",
            p50,
            p90,
            p99,
            outcome.algorithm.as_str()
        ));
    }
    lines.push(format!("Verdict: {}", verdict_label(outcome.verdict)));
    if let Some(assessment) = outcome.assessment {
        lines.push(format!("Mission assessment: {}", assessment.message()));
    }
    lines
}

const fn verdict_label(verdict: Option<Verdict>) -> &'static str {
    match verdict {
        Some(Verdict::Accept) => "accepted",
        Some(Verdict::Reject) => "rejected",
        None => "not evaluated (no thresholds)",
    }
}
