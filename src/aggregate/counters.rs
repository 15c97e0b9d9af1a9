use crate::domain::{AggregateReport, FailedRequests, ResponseCodes, WorkerResult};

#[derive(Debug, Default)]
pub(super) struct Totals {
    complete_requests: u64,
    failed_requests: FailedRequests,
    response_codes: ResponseCodes,
    requests_per_second: f64,
    time_per_request_sum_ms: f64,
    num_completed: usize,
    num_timeout: usize,
    num_transport_error: usize,
}

pub(super) fn tally(results: &[WorkerResult]) -> Totals {
    let mut totals = Totals::default();
    for result in results {
        match result {
            WorkerResult::Completed(sample) => {
                totals.num_completed = totals.num_completed.saturating_add(1);
                totals.complete_requests = totals
                    .complete_requests
                    .saturating_add(sample.complete_requests);
                totals.failed_requests = totals
                    .failed_requests
                    .saturating_add(sample.failed_requests);
                totals.response_codes = totals.response_codes.saturating_add(sample.response_codes);
                totals.requests_per_second += sample.requests_per_second;
                totals.time_per_request_sum_ms += sample.mean_time_per_request_ms;
            }
            WorkerResult::Timeout => {
                totals.num_timeout = totals.num_timeout.saturating_add(1);
            }
            WorkerResult::TransportError(_) => {
                totals.num_transport_error = totals.num_transport_error.saturating_add(1);
            }
        }
    }
    totals
}

impl Totals {
    pub(super) fn into_report(self, global_latency_percentiles: Vec<f64>) -> AggregateReport {
        let mean_time_per_request_ms = if self.num_completed > 0 {
            self.time_per_request_sum_ms / self.num_completed as f64
        } else {
            0.0
        };
        // No completed worker means no latency data, whatever the algorithm returned.
        let global_latency_percentiles = if self.num_completed > 0 {
            global_latency_percentiles
        } else {
            Vec::new()
        };

        AggregateReport {
            total_complete_requests: self.complete_requests,
            total_failed_requests: self.failed_requests.total(),
            failed_requests: self.failed_requests,
            response_codes: self.response_codes,
            mean_requests_per_second: self.requests_per_second,
            mean_time_per_request_ms,
            global_latency_percentiles,
            num_completed: self.num_completed,
            num_timeout: self.num_timeout,
            num_transport_error: self.num_transport_error,
        }
    }
}
