use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(about, long_about = None)]
pub struct CliArgs {
    /// Directory holding one JSON run record per load test run.
    #[arg(long, env = "HISTORY_DIR", default_value = "results/history")]
    pub history_dir: PathBuf,

    /// Directory to write the report to.
    #[arg(long, env = "REPORT_OUTPUT_DIR", default_value = "results")]
    pub output_dir: PathBuf,

    /// Maximum number of most recent runs to include.
    #[arg(long, env = "HISTORY_WINDOW", default_value_t = load_history_summariser::loader::DEFAULT_HISTORY_WINDOW)]
    pub window: usize,

    /// Do not print the run history table.
    #[arg(long)]
    pub quiet: bool,
}
