use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

mod extract;
mod record;

pub use extract::{extract_scenario_summary, round_to, ScenarioSummary, BYTES_PER_MB};
pub use record::{MetricBundle, RawRunRecord};

/// Display date used when a run record does not carry one
pub const UNKNOWN_DATE: &str = "Unknown";

/// The named load profiles that a run record may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioName {
    Smoke,
    Stress,
    Spike,
    FullLoad,
}

impl ScenarioName {
    /// Every scenario the loader looks for in a run record, in report order
    pub const ALL: [ScenarioName; 4] = [
        ScenarioName::Smoke,
        ScenarioName::Stress,
        ScenarioName::Spike,
        ScenarioName::FullLoad,
    ];

    /// The key used for this scenario in a run record
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioName::Smoke => "smoke",
            ScenarioName::Stress => "stress",
            ScenarioName::Spike => "spike",
            ScenarioName::FullLoad => "full_load",
        }
    }
}

impl FromStr for ScenarioName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smoke" => Ok(ScenarioName::Smoke),
            "stress" => Ok(ScenarioName::Stress),
            "spike" => Ok(ScenarioName::Spike),
            "full_load" => Ok(ScenarioName::FullLoad),
            _ => Err("Unknown scenario name"),
        }
    }
}

impl fmt::Display for ScenarioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a run has to offer for one scenario
///
/// Keeps "the scenario never ran" apart from "the scenario ran but made no requests", so that
/// consumers can show a gap for the former and a real zero for the latter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenarioData<'a> {
    /// No block for this scenario in the run record
    Absent,
    /// The scenario ran but recorded no requests
    Idle(&'a ScenarioSummary),
    /// The scenario ran and recorded at least one request
    Measured(&'a ScenarioSummary),
}

impl<'a> ScenarioData<'a> {
    /// The summary, if the scenario recorded any requests
    pub fn measured(self) -> Option<&'a ScenarioSummary> {
        match self {
            ScenarioData::Measured(summary) => Some(summary),
            _ => None,
        }
    }

    /// The summary, if the scenario block was present at all
    pub fn present(self) -> Option<&'a ScenarioSummary> {
        match self {
            ScenarioData::Absent => None,
            ScenarioData::Idle(summary) | ScenarioData::Measured(summary) => Some(summary),
        }
    }
}

/// Normalized summary of one historical run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// The run id
    ///
    /// Taken from the record, or derived from the record's storage key when the record does
    /// not carry one.
    pub run_id: String,
    /// The display date of the run, [UNKNOWN_DATE] when the record does not carry one
    pub date: String,
    /// One summary per scenario block found in the record
    ///
    /// Scenarios without a block are not present in the map.
    pub scenarios: BTreeMap<ScenarioName, ScenarioSummary>,
}

impl RunSummary {
    /// Build the summary for a parsed run record
    ///
    /// The `storage_key` is the name the record is stored under, without its extension.
    pub fn from_record(record: &RawRunRecord, storage_key: &str) -> Self {
        let scenarios = ScenarioName::ALL
            .into_iter()
            .filter_map(|name| {
                record
                    .metric_bundle(name)
                    .map(|bundle| (name, extract_scenario_summary(Some(bundle))))
            })
            .collect();

        Self {
            run_id: non_empty(record.run_id.as_deref())
                .unwrap_or(storage_key)
                .to_string(),
            date: non_empty(record.date_display.as_deref())
                .unwrap_or(UNKNOWN_DATE)
                .to_string(),
            scenarios,
        }
    }

    /// The data this run holds for a scenario
    pub fn scenario(&self, name: ScenarioName) -> ScenarioData<'_> {
        match self.scenarios.get(&name) {
            None => ScenarioData::Absent,
            Some(summary) if summary.requests > 0 => ScenarioData::Measured(summary),
            Some(summary) => ScenarioData::Idle(summary),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// An error reading a run record
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde JSON error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Run record is not a JSON object, found: {found}")]
    NotAnObject { found: &'static str },
}

/// Load a run record from a reader
///
/// The record must be a JSON object. Anything else is rejected before its fields are read.
pub fn load_run_record<R: Read>(reader: R) -> Result<RawRunRecord, RecordError> {
    let reader = std::io::BufReader::new(reader);
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    if !value.is_object() {
        return Err(RecordError::NotAnObject {
            found: json_kind(&value),
        });
    }

    let record: RawRunRecord = serde_json::from_value(value)?;
    Ok(record)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Load a run record from a file
pub fn read_run_record(path: &Path) -> Result<RawRunRecord, RecordError> {
    let file = std::fs::File::open(path)?;
    load_run_record(file)
}
