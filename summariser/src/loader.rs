use load_history_model::{read_run_record, RunSummary};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Number of most recent runs kept in a [HistoryWindow] by default
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// File extension of run records in the history store
pub const RECORD_EXTENSION: &str = "json";

/// The most recent runs from the history store, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct HistoryWindow {
    runs: Vec<RunSummary>,
}

impl HistoryWindow {
    pub fn runs(&self) -> &[RunSummary] {
        &self.runs
    }

    /// The most recent run, if there is one
    pub fn latest(&self) -> Option<&RunSummary> {
        self.runs.last()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Wrap runs that are already ordered oldest first
impl From<Vec<RunSummary>> for HistoryWindow {
    fn from(runs: Vec<RunSummary>) -> Self {
        Self { runs }
    }
}

/// Reads the history store into a [HistoryWindow]
///
/// The store is a directory holding one JSON file per run. File names must sort in the order the
/// runs happened, for example by starting with a timestamp, because only the last files by name
/// are loaded.
#[derive(Debug, Clone)]
pub struct HistoryLoader {
    store: PathBuf,
    window: usize,
}

impl HistoryLoader {
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
            window: DEFAULT_HISTORY_WINDOW,
        }
    }

    /// Keep at most `window` runs, at least one
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    pub fn store(&self) -> &Path {
        &self.store
    }

    /// Load the most recent runs
    ///
    /// This never fails. A missing store is created and reads as empty, and records that cannot
    /// be read or parsed are left out of the window.
    pub fn load(&self) -> HistoryWindow {
        log::debug!("Loading run history from {}", self.store.display());

        if !self.ensure_store() {
            return HistoryWindow::default();
        }

        let files = match self.record_files() {
            Ok(files) => files,
            Err(e) => {
                log::error!(
                    "Failed to list run records in {}: {e}",
                    self.store.display()
                );
                return HistoryWindow::default();
            }
        };

        let skip = files.len().saturating_sub(self.window);
        let runs = files
            .into_iter()
            .skip(skip)
            .filter_map(|path| load_run(&path))
            .collect::<Vec<_>>();

        log::info!(
            "Loaded {} runs from {}",
            runs.len(),
            self.store.display()
        );

        HistoryWindow { runs }
    }

    /// Returns true if the store exists and can be listed
    fn ensure_store(&self) -> bool {
        if self.store.is_dir() {
            return true;
        }

        log::debug!(
            "History store {} does not exist, creating it",
            self.store.display()
        );
        if let Err(e) = std::fs::create_dir_all(&self.store) {
            log::warn!(
                "Failed to create history store {}: {e}",
                self.store.display()
            );
        }

        false
    }

    /// Run record files in the store, sorted by file name
    fn record_files(&self) -> Result<Vec<PathBuf>, walkdir::Error> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.store)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if is_run_record(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

fn is_run_record(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|extension| extension == RECORD_EXTENSION)
}

fn load_run(path: &Path) -> Option<RunSummary> {
    let storage_key = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    match read_run_record(path) {
        Ok(record) => {
            log::debug!("Read run record {}", path.display());
            Some(RunSummary::from_record(&record, &storage_key))
        }
        Err(e) => {
            log::warn!("Dropping run record {}: {e}", path.display());
            None
        }
    }
}
