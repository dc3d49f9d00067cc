//! Library exports for nodeipam-metrics, shared between the binary and tests.

pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use error::{MetricsError, Result};
pub use metrics::{
    record_work_item_error_metrics, record_work_item_latency_metrics, register_metrics,
};
