//! Node IPAM controller work-queue metrics.
//!
//! The free functions operate on one process-wide [`WorkItemMetrics`] bound
//! to the Prometheus default registry. Call [`register_metrics`] during
//! controller startup; recordings made before that are dropped.

pub mod definitions;
mod prometheus_sink;
mod recorder;
mod sink;

use std::sync::OnceLock;

pub use definitions::{
    CounterDefinition, ExponentialBuckets, HistogramDefinition, StabilityLevel,
    WORK_ITEM_DURATION, WORK_ITEM_ERROR,
};
pub use prometheus_sink::PrometheusSink;
pub use recorder::WorkItemMetrics;
pub use sink::{Labels, MetricsSink};

use crate::error::Result;

static GLOBAL: OnceLock<WorkItemMetrics<PrometheusSink>> = OnceLock::new();

/// Process-wide recorder over the Prometheus default registry.
pub fn global() -> &'static WorkItemMetrics<PrometheusSink> {
    GLOBAL.get_or_init(|| WorkItemMetrics::new(PrometheusSink::global()))
}

/// Registers the node IPAM controller metrics with the default registry.
///
/// Safe to call any number of times from any thread; only the first call
/// registers. Panics if the registry already holds a conflicting metric.
pub fn register_metrics() {
    global().register();
}

pub fn metrics_registered() -> bool {
    global().is_registered()
}

/// Observes how long a work item took, in seconds, under `latency_type`.
pub fn record_work_item_latency_metrics(latency_type: &str, time_taken: f64) {
    global().record_latency(latency_type, time_taken);
}

/// Counts an error of `error_type` while handling `instance_id`.
pub fn record_work_item_error_metrics(error_type: &str, instance_id: &str) {
    global().record_error(error_type, instance_id);
}

/// Renders the default registry in Prometheus text format.
pub fn render_global() -> Result<String> {
    prometheus_sink::render_registry(prometheus::default_registry())
}
