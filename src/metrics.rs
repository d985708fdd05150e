use std::sync::OnceLock;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::models::Outcome;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload. Safe to call more than once.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                tracing::warn!("A global metrics recorder is already installed");
            }

            // Pre-register counters so they appear even before the first increment.
            counter!("bets_placed_total").absolute(0);
            counter!("bets_deleted_total").absolute(0);
            for outcome in [Outcome::Pending, Outcome::Won, Outcome::Lost] {
                counter!("bets_settled_total", "outcome" => outcome.as_str()).absolute(0);
            }
            counter!("bet_validation_failures_total").absolute(0);

            // Histogram is lazily created on first record; force creation.
            histogram!("bet_stake").record(0.0);

            handle
        })
        .clone()
}
