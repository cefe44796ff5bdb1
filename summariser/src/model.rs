use crate::comparison::{compare_latest, Comparison};
use crate::history::{build_history_rows, HistoryRow};
use crate::loader::HistoryWindow;
use crate::trend::{build_trends, TrendSeries};
use load_history_model::RunSummary;
use serde::{Deserialize, Serialize};

/// Everything the report renderer needs, derived from one history window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportOutput {
    /// When the report was generated, RFC 3339
    pub generated_at: String,
    /// Number of runs in the history window
    pub run_count: usize,
    /// Display date of each run, oldest first
    pub labels: Vec<String>,
    pub trends: TrendSeries,
    /// Latest run against the one before, if both have stress data
    pub comparison: Option<Comparison>,
    /// Table rows, newest run first
    pub history: Vec<HistoryRow>,
    /// The most recent run, for the latest results snapshot
    pub latest: Option<RunSummary>,
}

impl ReportOutput {
    pub fn new(window: &HistoryWindow, generated_at: impl Into<String>) -> Self {
        let trends = build_trends(window);
        Self {
            generated_at: generated_at.into(),
            run_count: window.len(),
            labels: trends.labels.clone(),
            trends,
            comparison: compare_latest(window),
            history: build_history_rows(window),
            latest: window.latest().cloned(),
        }
    }

    /// Display date of each run, oldest first
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
