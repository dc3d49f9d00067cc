//! Work item metrics recording with a one-shot registration guard.

use std::sync::Once;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::definitions::{
    ERROR_TYPE_LABEL, INSTANCE_ID_LABEL, LATENCY_TYPE_LABEL, WORK_ITEM_DURATION, WORK_ITEM_ERROR,
};
use super::sink::{Labels, MetricsSink};
use crate::utils::log_throttle::should_emit;

const DROPPED_LOG_WINDOW: Duration = Duration::from_secs(60);

/// Records work item latency and error observations into a [`MetricsSink`].
///
/// Observations made before [`register`](Self::register) has completed are
/// dropped, mirroring registries that only materialize a vector once it is
/// registered.
pub struct WorkItemMetrics<S: MetricsSink> {
    sink: S,
    registered: Once,
}

impl<S: MetricsSink> WorkItemMetrics<S> {
    pub fn new(sink: S) -> Self {
        WorkItemMetrics {
            sink,
            registered: Once::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Registers the work item metrics with the sink.
    ///
    /// Only the first call reaches the sink; concurrent callers block until it
    /// has finished and every later call returns immediately.
    ///
    /// # Panics
    ///
    /// Panics if the sink rejects either metric. A rejected registration
    /// leaves the guard poisoned, so later calls panic as well.
    pub fn register(&self) {
        self.registered.call_once(|| {
            if let Err(e) = self.sink.register_histogram(&WORK_ITEM_DURATION) {
                error!(metric = WORK_ITEM_DURATION.name, error = %e, "metric registration failed");
                panic!("failed to register {}: {}", WORK_ITEM_DURATION.name, e);
            }
            if let Err(e) = self.sink.register_counter(&WORK_ITEM_ERROR) {
                error!(metric = WORK_ITEM_ERROR.name, error = %e, "metric registration failed");
                panic!("failed to register {}: {}", WORK_ITEM_ERROR.name, e);
            }
            info!("registered nodeipam controller work item metrics");
        });
    }

    pub fn is_registered(&self) -> bool {
        self.registered.is_completed()
    }

    /// Records `time_taken` seconds under `latency_type`.
    pub fn record_latency(&self, latency_type: &str, time_taken: f64) {
        if !self.accepts(WORK_ITEM_DURATION.name) {
            return;
        }
        let labels = Labels::from([(LATENCY_TYPE_LABEL, latency_type)]);
        if let Err(e) = self.sink.observe(WORK_ITEM_DURATION.name, &labels, time_taken) {
            report_dropped(WORK_ITEM_DURATION.name, &e);
        }
    }

    /// Counts one error of `error_type` for `instance_id`.
    pub fn record_error(&self, error_type: &str, instance_id: &str) {
        if !self.accepts(WORK_ITEM_ERROR.name) {
            return;
        }
        let labels = Labels::from([
            (ERROR_TYPE_LABEL, error_type),
            (INSTANCE_ID_LABEL, instance_id),
        ]);
        if let Err(e) = self.sink.increment(WORK_ITEM_ERROR.name, &labels) {
            report_dropped(WORK_ITEM_ERROR.name, &e);
        }
    }

    fn accepts(&self, metric: &str) -> bool {
        if self.is_registered() {
            return true;
        }
        if let Some(suppressed) = should_emit(&format!("{metric}.unregistered"), DROPPED_LOG_WINDOW)
        {
            debug!(
                metric,
                suppressed, "dropping observation recorded before metrics registration"
            );
        }
        false
    }
}

fn report_dropped(metric: &str, error: &crate::error::MetricsError) {
    if let Some(suppressed) = should_emit(&format!("{metric}.rejected"), DROPPED_LOG_WINDOW) {
        warn!(metric, suppressed, error = %error, "metric observation rejected");
    }
}
