//! Derives the historical performance report from stored load test run records.
//!
//! [loader::HistoryLoader] reads the most recent runs from the history store. Everything else is
//! a pure function of the resulting [loader::HistoryWindow], collected into a
//! [model::ReportOutput] for the renderer.

use crate::loader::HistoryLoader;
use crate::model::ReportOutput;

pub mod comparison;
pub mod fallback;
pub mod history;
pub mod loader;
pub mod model;
pub mod table;
pub mod trend;

/// Load the history store and derive the full report from it
pub fn summarise_history(loader: &HistoryLoader, generated_at: impl Into<String>) -> ReportOutput {
    let window = loader.load();
    ReportOutput::new(&window, generated_at)
}
