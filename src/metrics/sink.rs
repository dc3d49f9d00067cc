//! The registry capability the recorder writes through.

use std::collections::HashMap;

use super::definitions::{CounterDefinition, HistogramDefinition};
use crate::error::Result;

/// Label name to label value, selecting one series of a vector metric.
pub type Labels<'a> = HashMap<&'a str, &'a str>;

/// A metrics registry the work item recorder can install metrics into and
/// record observations against.
///
/// Implementations own the per-series synchronization; every method may be
/// called concurrently from any number of threads.
pub trait MetricsSink: Send + Sync + 'static {
    /// Installs a labelled histogram described by `definition`.
    fn register_histogram(&self, definition: &HistogramDefinition) -> Result<()>;

    /// Installs a labelled counter described by `definition`.
    fn register_counter(&self, definition: &CounterDefinition) -> Result<()>;

    /// Records one observation on the histogram series selected by `labels`,
    /// creating the series on first use.
    fn observe(&self, name: &str, labels: &Labels<'_>, value: f64) -> Result<()>;

    /// Increments the counter series selected by `labels` by one, creating
    /// the series on first use.
    fn increment(&self, name: &str, labels: &Labels<'_>) -> Result<()>;
}
