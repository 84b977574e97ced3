//! Request metrics.

use metrics::{counter, histogram};
use std::time::Instant;

/// Record the duration of one API request.
pub fn record_request_duration(endpoint: &str, duration_secs: f64) {
    histogram!(
        "remote_request_duration_seconds",
        "endpoint" => endpoint.to_string()
    )
    .record(duration_secs);
}

/// Count a failed API request.
pub fn record_request_failure(endpoint: &str) {
    counter!(
        "remote_request_failures_total",
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Times a single request.
///
/// ```ignore
/// let timer = RequestTimer::new("list_users");
/// let result = client.http().get(url).send().await;
/// timer.finish(result.is_ok());
/// ```
pub struct RequestTimer {
    endpoint: &'static str,
    start: Instant,
}

impl RequestTimer {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            start: Instant::now(),
        }
    }

    /// Record the elapsed time, and a failure if `ok` is false.
    pub fn finish(self, ok: bool) {
        record_request_duration(self.endpoint, self.start.elapsed().as_secs_f64());
        if !ok {
            record_request_failure(self.endpoint);
        }
    }
}
