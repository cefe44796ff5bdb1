use crate::ScenarioName;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A run record as written by the load test runner, one file per run
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawRunRecord {
    /// The run id, if the runner recorded one
    #[serde(default)]
    pub run_id: Option<String>,
    /// Human readable date of the run, if the runner recorded one
    #[serde(default)]
    pub date_display: Option<String>,
    /// Everything else in the record, keyed by scenario name
    ///
    /// Values are kept as raw JSON because the load testing engine's summary shape is not under
    /// our control.
    #[serde(flatten)]
    pub scenarios: BTreeMap<String, serde_json::Value>,
}

impl RawRunRecord {
    /// The metrics written for a scenario
    ///
    /// Returns [None] if the scenario has no block, or its block has no `metrics` object.
    pub fn metric_bundle(&self, name: ScenarioName) -> Option<MetricBundle<'_>> {
        self.scenarios
            .get(name.as_str())
            .and_then(|block| block.get("metrics"))
            .filter(|metrics| metrics.is_object())
            .map(MetricBundle)
    }
}

/// One scenario's metrics, keyed by metric name
///
/// Each metric exposes its aggregates under `values`, for example
/// `{"http_req_duration": {"values": {"avg": 101.5, "p(95)": 180.2}}}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBundle<'a>(&'a serde_json::Value);

impl<'a> MetricBundle<'a> {
    pub fn new(metrics: &'a serde_json::Value) -> Self {
        Self(metrics)
    }

    /// Look up one aggregate of one metric
    ///
    /// Any missing path segment, or a value that is not a number, gives [None].
    pub fn stat(&self, metric: &str, stat: &str) -> Option<f64> {
        self.0
            .get(metric)?
            .get("values")?
            .get(stat)?
            .as_f64()
    }
}
