use crate::loader::HistoryWindow;
use load_history_model::{RunSummary, ScenarioName, ScenarioSummary};
use serde::{Deserialize, Serialize};

/// The scenario whose data represents a run in the history table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Stress,
    Spike,
    Full,
}

impl ScenarioKind {
    pub fn label(self) -> &'static str {
        match self {
            ScenarioKind::Stress => "Stress",
            ScenarioKind::Spike => "Spike",
            ScenarioKind::Full => "Full Load",
        }
    }
}

/// How concerning an error rate is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Warn,
    Bad,
}

impl Severity {
    /// Error rates from this percentage up are at least [Severity::Warn]
    pub const WARN_PERCENT: f64 = 1.0;
    /// Error rates from this percentage up are [Severity::Bad]
    pub const BAD_PERCENT: f64 = 5.0;

    pub fn classify(error_rate_percent: f64) -> Self {
        if error_rate_percent < Self::WARN_PERCENT {
            Severity::Good
        } else if error_rate_percent < Self::BAD_PERCENT {
            Severity::Warn
        } else {
            Severity::Bad
        }
    }
}

/// One line of the run history table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRow {
    pub run_id: String,
    pub date: String,
    pub kind: ScenarioKind,
    pub label: String,
    pub requests: u64,
    pub error_rate_percent: f64,
    pub severity: Severity,
    pub avg_duration_ms: f64,
    pub med_duration_ms: f64,
    pub p95_duration_ms: f64,
    pub max_duration_ms: f64,
    pub rps: f64,
    pub data_received_mb: f64,
}

impl HistoryRow {
    fn new(run: &RunSummary, kind: ScenarioKind, summary: &ScenarioSummary) -> Self {
        Self {
            run_id: run.run_id.clone(),
            date: run.date.clone(),
            kind,
            label: kind.label().to_string(),
            requests: summary.requests,
            error_rate_percent: summary.error_rate_percent,
            severity: Severity::classify(summary.error_rate_percent),
            avg_duration_ms: summary.avg_duration_ms,
            med_duration_ms: summary.med_duration_ms,
            p95_duration_ms: summary.p95_duration_ms,
            max_duration_ms: summary.max_duration_ms,
            rps: summary.rps,
            data_received_mb: summary.data_received_mb,
        }
    }
}

/// One row per run that recorded requests, newest run first
pub fn build_history_rows(window: &HistoryWindow) -> Vec<HistoryRow> {
    window
        .runs()
        .iter()
        .rev()
        .filter_map(|run| {
            representative(run).map(|(kind, summary)| HistoryRow::new(run, kind, summary))
        })
        .collect()
}

/// Stress, then spike, then full load, whichever first recorded requests
fn representative(run: &RunSummary) -> Option<(ScenarioKind, &ScenarioSummary)> {
    [
        (ScenarioKind::Stress, ScenarioName::Stress),
        (ScenarioKind::Spike, ScenarioName::Spike),
        (ScenarioKind::Full, ScenarioName::FullLoad),
    ]
    .into_iter()
    .find_map(|(kind, name)| run.scenario(name).measured().map(|summary| (kind, summary)))
}
