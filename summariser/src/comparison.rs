use crate::fallback::effective_stress;
use crate::loader::HistoryWindow;
use itertools::Itertools;
use load_history_model::round_to;
use serde::{Deserialize, Serialize};

/// Which way a response time moved between two runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Better,
    Worse,
}

impl Direction {
    /// Any increase in response time is worse
    pub fn of(delta_percent: f64) -> Self {
        if delta_percent > 0.0 {
            Direction::Worse
        } else {
            Direction::Better
        }
    }
}

/// A response time in the latest run against the run before it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeltaComparison {
    pub current: f64,
    pub previous: f64,
    /// Change relative to `previous`, in percent, rounded to one decimal place
    pub delta_percent: f64,
    pub direction: Direction,
}

impl DeltaComparison {
    fn new(current: f64, previous: f64) -> Self {
        let delta_percent = percent_delta(current, previous);
        Self {
            current,
            previous,
            delta_percent,
            direction: Direction::of(delta_percent),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuePair {
    pub current: f64,
    pub previous: f64,
}

/// The latest run against the run before it, using each run's effective stress data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comparison {
    pub current_run_id: String,
    pub current_date: String,
    pub previous_run_id: String,
    pub previous_date: String,
    pub avg_duration_ms: DeltaComparison,
    pub p95_duration_ms: DeltaComparison,
    pub error_rate_percent: ValuePair,
    pub rps: ValuePair,
}

/// Compare the two most recent runs
///
/// Returns [None] when there are fewer than two runs, or when either run has no effective stress
/// data.
pub fn compare_latest(window: &HistoryWindow) -> Option<Comparison> {
    let (current_run, previous_run) = window.runs().iter().rev().take(2).collect_tuple()?;
    let current = effective_stress(current_run)?;
    let previous = effective_stress(previous_run)?;

    Some(Comparison {
        current_run_id: current_run.run_id.clone(),
        current_date: current_run.date.clone(),
        previous_run_id: previous_run.run_id.clone(),
        previous_date: previous_run.date.clone(),
        avg_duration_ms: DeltaComparison::new(current.avg_duration_ms, previous.avg_duration_ms),
        p95_duration_ms: DeltaComparison::new(current.p95_duration_ms, previous.p95_duration_ms),
        error_rate_percent: ValuePair {
            current: current.error_rate_percent,
            previous: previous.error_rate_percent,
        },
        rps: ValuePair {
            current: current.rps,
            previous: previous.rps,
        },
    })
}

/// Percentage change from `previous` to `current`, rounded to one decimal place
///
/// Zero when `previous` is zero.
pub fn percent_delta(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 {
        return 0.0;
    }

    round_to((current - previous) / previous * 100.0, 1)
}
