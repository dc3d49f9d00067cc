//! Static descriptors for the node IPAM controller's work-queue metrics.
//!
//! Definitions are plain `const` data and are not bound to any registry;
//! a [`MetricsSink`](super::MetricsSink) turns them into live collectors
//! when they are registered.

use std::fmt;

/// Label carried by the work item duration histogram.
pub const LATENCY_TYPE_LABEL: &str = "latency_type";
/// Labels carried by the work item error counter.
pub const ERROR_TYPE_LABEL: &str = "error_type";
pub const INSTANCE_ID_LABEL: &str = "instance_id";

/// Maturity of a metric's name and label schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityLevel {
    Internal,
    Alpha,
    Beta,
    Stable,
}

impl StabilityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            StabilityLevel::Internal => "INTERNAL",
            StabilityLevel::Alpha => "ALPHA",
            StabilityLevel::Beta => "BETA",
            StabilityLevel::Stable => "STABLE",
        }
    }

    /// Help text as exposed to scrapers, e.g. `[ALPHA] workitem latency ...`.
    pub fn decorate_help(self, help: &str) -> String {
        format!("[{}] {}", self.as_str(), help)
    }
}

impl fmt::Display for StabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exponentially growing histogram bucket upper bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBuckets {
    pub start: f64,
    pub factor: f64,
    pub count: usize,
}

impl ExponentialBuckets {
    /// Upper bounds `start * factor^i` for `i` in `0..count`.
    pub fn bounds(&self) -> Vec<f64> {
        let mut bounds = Vec::with_capacity(self.count);
        let mut next = self.start;
        for _ in 0..self.count {
            bounds.push(next);
            next *= self.factor;
        }
        bounds
    }
}

/// Shape of a labelled histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramDefinition {
    pub name: &'static str,
    pub help: &'static str,
    pub stability: StabilityLevel,
    pub buckets: ExponentialBuckets,
    pub labels: &'static [&'static str],
}

impl HistogramDefinition {
    pub fn exposed_help(&self) -> String {
        self.stability.decorate_help(self.help)
    }
}

/// Shape of a labelled counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDefinition {
    pub name: &'static str,
    pub help: &'static str,
    pub stability: StabilityLevel,
    pub labels: &'static [&'static str],
}

impl CounterDefinition {
    pub fn exposed_help(&self) -> String {
        self.stability.decorate_help(self.help)
    }
}

/// Time a work item spends queued and being processed, in seconds.
pub const WORK_ITEM_DURATION: HistogramDefinition = HistogramDefinition {
    name: "cloudprovider_aws_nodeipam_controller_work_item_duration_seconds",
    help: "workitem latency of workitem being in the queue and time it takes to process",
    stability: StabilityLevel::Alpha,
    buckets: ExponentialBuckets {
        start: 0.5,
        factor: 1.5,
        count: 20,
    },
    labels: &[LATENCY_TYPE_LABEL],
};

/// Errors hit while dequeueing or processing a work item.
pub const WORK_ITEM_ERROR: CounterDefinition = CounterDefinition {
    name: "cloudprovider_aws_nodeipam_controller_work_item_errors_total",
    help: "any error in dequeueing the work queue and processing workItem",
    stability: StabilityLevel::Alpha,
    labels: &[ERROR_TYPE_LABEL, INSTANCE_ID_LABEL],
};
