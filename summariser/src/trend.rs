use crate::fallback::VirtualScenario;
use crate::loader::HistoryWindow;
use load_history_model::ScenarioSummary;
use serde::{Deserialize, Serialize};

/// Per run values of one virtual scenario, aligned with [TrendSeries::labels]
///
/// `None` marks a run with no data for the scenario, which charts should draw as a gap.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScenarioTrend {
    pub avg_duration_ms: Vec<Option<f64>>,
    pub p95_duration_ms: Vec<Option<f64>>,
    pub max_duration_ms: Vec<Option<f64>>,
    pub error_rate_percent: Vec<Option<f64>>,
    pub rps: Vec<Option<f64>>,
    pub requests: Vec<Option<u64>>,
}

/// Time series over the history window, oldest run first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrendSeries {
    /// Display date of each run
    pub labels: Vec<String>,
    pub stress: ScenarioTrend,
    pub spike: ScenarioTrend,
}

pub fn build_trends(window: &HistoryWindow) -> TrendSeries {
    TrendSeries {
        labels: window.runs().iter().map(|run| run.date.clone()).collect(),
        stress: scenario_trend(window, VirtualScenario::Stress),
        spike: scenario_trend(window, VirtualScenario::Spike),
    }
}

fn scenario_trend(window: &HistoryWindow, scenario: VirtualScenario) -> ScenarioTrend {
    let effective = window
        .runs()
        .iter()
        .map(|run| scenario.resolve(run))
        .collect::<Vec<_>>();

    let series = |field: fn(&ScenarioSummary) -> f64| -> Vec<Option<f64>> {
        effective.iter().map(|summary| summary.map(field)).collect()
    };

    ScenarioTrend {
        avg_duration_ms: series(|s| s.avg_duration_ms),
        p95_duration_ms: series(|s| s.p95_duration_ms),
        max_duration_ms: series(|s| s.max_duration_ms),
        error_rate_percent: series(|s| s.error_rate_percent),
        rps: series(|s| s.rps),
        requests: effective
            .iter()
            .map(|summary| summary.map(|s| s.requests))
            .collect(),
    }
}
