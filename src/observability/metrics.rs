//! Metrics collection and exposition.
//!
//! # Metrics
//! - `resolver_lookups_total` (counter): lookups by outcome
//!   (`matched`, `not_found`, `malformed`)
//! - `resolver_lookup_duration_seconds` (histogram): lookup latency
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::ResolveError;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Outcome label for a lookup result.
pub fn outcome_label<T>(result: &Result<T, ResolveError>) -> &'static str {
    match result {
        Ok(_) => "matched",
        Err(ResolveError::RouteNotFound { .. }) => "not_found",
        Err(ResolveError::MalformedPattern { .. }) => "malformed",
    }
}

pub fn record_resolution(outcome: &'static str, started: Instant) {
    metrics::counter!("resolver_lookups_total", "outcome" => outcome).increment(1);
    metrics::histogram!("resolver_lookup_duration_seconds", "outcome" => outcome)
        .record(started.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::GlobError;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome_label::<&str>(&Ok("**")), "matched");
        assert_eq!(
            outcome_label::<&str>(&Err(ResolveError::RouteNotFound {
                descriptor: "GET /".into()
            })),
            "not_found"
        );
        assert_eq!(
            outcome_label::<&str>(&Err(ResolveError::MalformedPattern {
                pattern: "GET **".into(),
                source: GlobError::IllegalSubtree,
            })),
            "malformed"
        );
    }

    #[test]
    fn test_record_without_recorder_is_noop() {
        record_resolution("matched", Instant::now());
    }
}
