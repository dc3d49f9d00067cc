#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread::sleep;
use std::time::Duration;

use nodeipam_metrics::metrics::{CounterDefinition, HistogramDefinition, Labels, MetricsSink};
use nodeipam_metrics::{MetricsError, Result};

type SeriesKey = (String, Vec<(String, String)>);

/// In-memory stand-in for a metrics registry.
#[derive(Default)]
pub struct InMemorySink {
    histogram_registrations: AtomicUsize,
    counter_registrations: AtomicUsize,
    schemas: Mutex<HashMap<String, Vec<String>>>,
    observations: Mutex<BTreeMap<SeriesKey, Vec<f64>>>,
    counts: Mutex<BTreeMap<SeriesKey, u64>>,
    pub reject_registration: bool,
    pub registration_delay: Option<Duration>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_registration() -> Self {
        InMemorySink {
            reject_registration: true,
            ..Self::default()
        }
    }

    pub fn slow_registration(delay: Duration) -> Self {
        InMemorySink {
            registration_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn histogram_registrations(&self) -> usize {
        self.histogram_registrations.load(Ordering::SeqCst)
    }

    pub fn counter_registrations(&self) -> usize {
        self.counter_registrations.load(Ordering::SeqCst)
    }

    pub fn observations(&self, name: &str, labels: &[(&str, &str)]) -> Vec<f64> {
        self.observations
            .lock()
            .unwrap()
            .get(&key(name, labels.iter().copied()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self, name: &str, labels: &[(&str, &str)]) -> u64 {
        self.counts
            .lock()
            .unwrap()
            .get(&key(name, labels.iter().copied()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct series recorded for `name`, across both kinds.
    pub fn series(&self, name: &str) -> usize {
        let histograms = self
            .observations
            .lock()
            .unwrap()
            .keys()
            .filter(|(n, _)| n == name)
            .count();
        let counters = self
            .counts
            .lock()
            .unwrap()
            .keys()
            .filter(|(n, _)| n == name)
            .count();
        histograms + counters
    }

    fn register(&self, name: &str, labels: &[&str]) -> Result<()> {
        if let Some(delay) = self.registration_delay {
            sleep(delay);
        }
        if self.reject_registration {
            return Err(MetricsError::Registration {
                name: name.to_string(),
                source: prometheus::Error::Msg("name claimed by another collector".to_string()),
            });
        }
        let mut schemas = self.schemas.lock().unwrap();
        if schemas.contains_key(name) {
            return Err(MetricsError::AlreadyRegistered(name.to_string()));
        }
        schemas.insert(
            name.to_string(),
            labels.iter().map(|l| l.to_string()).collect(),
        );
        Ok(())
    }

    fn check_labels(&self, name: &str, labels: &Labels<'_>) -> Result<SeriesKey> {
        let schemas = self.schemas.lock().unwrap();
        let schema = schemas
            .get(name)
            .ok_or_else(|| MetricsError::NotRegistered(name.to_string()))?;
        let matches = schema.len() == labels.len()
            && schema.iter().all(|l| labels.contains_key(l.as_str()));
        if !matches {
            return Err(MetricsError::InvalidLabels {
                name: name.to_string(),
                reason: format!("expected {:?}", schema),
            });
        }
        Ok(key(name, labels.iter().map(|(k, v)| (*k, *v))))
    }
}

fn key<'a>(name: &str, labels: impl Iterator<Item = (&'a str, &'a str)>) -> SeriesKey {
    let mut labels: Vec<(String, String)> = labels
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    labels.sort();
    (name.to_string(), labels)
}

impl MetricsSink for InMemorySink {
    fn register_histogram(&self, definition: &HistogramDefinition) -> Result<()> {
        self.histogram_registrations.fetch_add(1, Ordering::SeqCst);
        self.register(definition.name, definition.labels)
    }

    fn register_counter(&self, definition: &CounterDefinition) -> Result<()> {
        self.counter_registrations.fetch_add(1, Ordering::SeqCst);
        self.register(definition.name, definition.labels)
    }

    fn observe(&self, name: &str, labels: &Labels<'_>, value: f64) -> Result<()> {
        let key = self.check_labels(name, labels)?;
        self.observations
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push(value);
        Ok(())
    }

    fn increment(&self, name: &str, labels: &Labels<'_>) -> Result<()> {
        let key = self.check_labels(name, labels)?;
        *self.counts.lock().unwrap().entry(key).or_default() += 1;
        Ok(())
    }
}
