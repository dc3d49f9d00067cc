//! Error type shared by the metric sinks and the recorder.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Failures surfaced by a [`MetricsSink`](crate::metrics::MetricsSink).
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The underlying registry refused the collector.
    #[error("failed to register metric {name}: {source}")]
    Registration {
        name: String,
        #[source]
        source: prometheus::Error,
    },
    /// The sink already holds a metric with this name.
    #[error("metric {0} is already registered")]
    AlreadyRegistered(String),
    /// An observation targeted a metric the sink has never registered.
    #[error("metric {0} is not registered")]
    NotRegistered(String),
    /// The supplied label set does not match the metric's schema.
    #[error("invalid labels for metric {name}: {reason}")]
    InvalidLabels { name: String, reason: String },
    #[error("failed to encode metrics: {0}")]
    Encoding(String),
}
