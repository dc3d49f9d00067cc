//! [`MetricsSink`] backed by a Prometheus registry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use tracing::debug;

use super::definitions::{CounterDefinition, HistogramDefinition};
use super::sink::{Labels, MetricsSink};
use crate::error::{MetricsError, Result};

/// Prometheus-backed metrics sink.
///
/// Cloning the wrapped [`Registry`] shares its storage, so a sink built from
/// [`prometheus::default_registry`] exposes everything it registers through
/// the process-wide `prometheus::gather()`.
pub struct PrometheusSink {
    registry: Registry,
    histograms: RwLock<HashMap<&'static str, HistogramVec>>,
    counters: RwLock<HashMap<&'static str, CounterVec>>,
}

impl PrometheusSink {
    pub fn new(registry: Registry) -> Self {
        PrometheusSink {
            registry,
            histograms: RwLock::new(HashMap::new()),
            counters: RwLock::new(HashMap::new()),
        }
    }

    /// Sink over the process default registry.
    pub fn global() -> Self {
        Self::new(prometheus::default_registry().clone())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renders everything in the registry in Prometheus text format.
    pub fn render(&self) -> Result<String> {
        render_registry(&self.registry)
    }
}

pub(crate) fn render_registry(registry: &Registry) -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| MetricsError::Encoding(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| MetricsError::Encoding(e.to_string()))
}

fn registration_error(name: &str, source: prometheus::Error) -> MetricsError {
    match source {
        prometheus::Error::AlreadyReg => MetricsError::AlreadyRegistered(name.to_string()),
        source => MetricsError::Registration {
            name: name.to_string(),
            source,
        },
    }
}

fn label_error(name: &str, source: prometheus::Error) -> MetricsError {
    MetricsError::InvalidLabels {
        name: name.to_string(),
        reason: source.to_string(),
    }
}

impl MetricsSink for PrometheusSink {
    fn register_histogram(&self, definition: &HistogramDefinition) -> Result<()> {
        let mut histograms = self
            .histograms
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if histograms.contains_key(definition.name) {
            return Err(MetricsError::AlreadyRegistered(definition.name.to_string()));
        }

        let opts = HistogramOpts::new(definition.name, definition.exposed_help())
            .buckets(definition.buckets.bounds());
        let histogram = HistogramVec::new(opts, definition.labels)
            .map_err(|e| registration_error(definition.name, e))?;
        self.registry
            .register(Box::new(histogram.clone()))
            .map_err(|e| registration_error(definition.name, e))?;

        debug!(metric = definition.name, "registered histogram");
        histograms.insert(definition.name, histogram);
        Ok(())
    }

    fn register_counter(&self, definition: &CounterDefinition) -> Result<()> {
        let mut counters = self.counters.write().unwrap_or_else(PoisonError::into_inner);
        if counters.contains_key(definition.name) {
            return Err(MetricsError::AlreadyRegistered(definition.name.to_string()));
        }

        let opts = Opts::new(definition.name, definition.exposed_help());
        let counter = CounterVec::new(opts, definition.labels)
            .map_err(|e| registration_error(definition.name, e))?;
        self.registry
            .register(Box::new(counter.clone()))
            .map_err(|e| registration_error(definition.name, e))?;

        debug!(metric = definition.name, "registered counter");
        counters.insert(definition.name, counter);
        Ok(())
    }

    fn observe(&self, name: &str, labels: &Labels<'_>, value: f64) -> Result<()> {
        let histograms = self.histograms.read().unwrap_or_else(PoisonError::into_inner);
        let histogram = histograms
            .get(name)
            .ok_or_else(|| MetricsError::NotRegistered(name.to_string()))?;
        histogram
            .get_metric_with(labels)
            .map_err(|e| label_error(name, e))?
            .observe(value);
        Ok(())
    }

    fn increment(&self, name: &str, labels: &Labels<'_>) -> Result<()> {
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
        let counter = counters
            .get(name)
            .ok_or_else(|| MetricsError::NotRegistered(name.to_string()))?;
        counter
            .get_metric_with(labels)
            .map_err(|e| label_error(name, e))?
            .inc();
        Ok(())
    }
}
