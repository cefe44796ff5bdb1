use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use load_history_summariser::loader::HistoryLoader;
use load_history_summariser::summarise_history;
use load_history_summariser::table::render_history_table;
use std::fs::File;

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli::CliArgs::parse();
    log::debug!("Using history store {}", args.history_dir.display());

    let loader = HistoryLoader::new(args.history_dir).with_window(args.window);
    let now = Utc::now();
    let report = summarise_history(&loader, now.to_rfc3339());

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create report directory {}",
            args.output_dir.display()
        )
    })?;
    let report_path = args.output_dir.join(format!(
        "load-history-report-{}.json",
        now.format("%Y-%m-%dT%H.%M.%S%.fZ")
    ));
    let file = File::create_new(&report_path)
        .with_context(|| format!("Failed to create report {}", report_path.display()))?;
    serde_json::to_writer_pretty(file, &report).context("Failed to write report")?;

    if !args.quiet {
        println!("\nRun history");
        println!("{}", render_history_table(&report.history));
    }

    println!("Report generated: {}", report_path.display());
    println!("Runs tracked: {}", report.run_count);

    Ok(())
}
