use load_history_model::{ScenarioName, UNKNOWN_DATE};
use load_history_summariser::comparison::Direction;
use load_history_summariser::history::{ScenarioKind, Severity};
use load_history_summariser::loader::HistoryLoader;
use load_history_summariser::model::ReportOutput;
use load_history_summariser::summarise_history;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixture_store() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join("history")
}

fn stress_record(requests: u64, avg: f64) -> String {
    serde_json::json!({
        "stress": {
            "metrics": {
                "http_reqs": { "values": { "count": requests } },
                "http_req_duration": { "values": { "avg": avg } }
            }
        }
    })
    .to_string()
}

fn fixture_report() -> ReportOutput {
    env_logger::try_init().ok();
    summarise_history(&HistoryLoader::new(fixture_store()), "2026-02-01T00:00:00Z")
}

#[test]
fn fixture_store_loads_valid_records_in_order() {
    let window = HistoryLoader::new(fixture_store()).load();

    let ids = window
        .runs()
        .iter()
        .map(|run| run.run_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["run-0105", "2026-01-12T10-00-00", "run-0126"]);

    let first = &window.runs()[0];
    assert_eq!(first.scenarios.len(), 4);
    let stress = &first.scenarios[&ScenarioName::Stress];
    assert_eq!(stress.requests, 38000);
    assert_eq!(stress.rps, 115.12);
    assert_eq!(stress.error_rate_percent, 0.95);
    assert_eq!(stress.med_duration_ms, 95.25);
    assert_eq!(stress.data_received_mb, 10.0);

    assert_eq!(window.runs()[2].date, UNKNOWN_DATE);
}

#[test]
fn fixture_trends_fall_back_to_full_load() {
    let report = fixture_report();

    assert_eq!(report.run_count, 3);
    assert_eq!(
        report.labels(),
        ["Jan 5, 2026, 10:00", "Jan 12, 2026, 10:00", "Unknown"]
    );
    assert_eq!(
        report.trends.stress.avg_duration_ms,
        vec![Some(100.0), Some(120.0), Some(132.0)]
    );
    assert_eq!(
        report.trends.stress.requests,
        vec![Some(38000), Some(500), Some(2000)]
    );
    assert_eq!(
        report.trends.spike.avg_duration_ms,
        vec![Some(90.0), Some(120.0), Some(80.0)]
    );
    assert_eq!(
        report.trends.spike.error_rate_percent,
        vec![Some(0.03), Some(1.0), Some(5.0)]
    );
}

#[test]
fn fixture_comparison_uses_effective_stress() {
    let comparison = fixture_report().comparison.expect("Expected a comparison");

    assert_eq!(comparison.current_run_id, "run-0126");
    assert_eq!(comparison.previous_run_id, "2026-01-12T10-00-00");
    assert_eq!(comparison.avg_duration_ms.current, 132.0);
    assert_eq!(comparison.avg_duration_ms.previous, 120.0);
    assert_eq!(comparison.avg_duration_ms.delta_percent, 10.0);
    assert_eq!(comparison.avg_duration_ms.direction, Direction::Worse);
    assert_eq!(comparison.p95_duration_ms.delta_percent, 10.0);
    assert_eq!(comparison.error_rate_percent.current, 0.4);
    assert_eq!(comparison.error_rate_percent.previous, 1.0);
    assert_eq!(comparison.rps.current, 10.0);
    assert_eq!(comparison.rps.previous, 2.5);
}

#[test]
fn fixture_history_rows_are_newest_first() {
    let report = fixture_report();

    let rows = report
        .history
        .iter()
        .map(|row| (row.run_id.as_str(), row.kind, row.requests, row.severity))
        .collect::<Vec<_>>();
    assert_eq!(
        rows,
        vec![
            ("run-0126", ScenarioKind::Spike, 1200, Severity::Bad),
            ("2026-01-12T10-00-00", ScenarioKind::Full, 500, Severity::Warn),
            ("run-0105", ScenarioKind::Stress, 38000, Severity::Good),
        ]
    );
    assert_eq!(report.history[0].data_received_mb, 1.5);
    assert_eq!(report.history[1].label, "Full Load");
}

#[test]
fn fixture_latest_is_the_newest_run() {
    let latest = fixture_report().latest.expect("Expected a latest run");

    assert_eq!(latest.run_id, "run-0126");
    assert_eq!(latest.scenarios[&ScenarioName::Stress].requests, 0);
    assert!(!latest.scenarios.contains_key(&ScenarioName::Smoke));
}

#[test]
fn loading_is_idempotent() {
    let loader = HistoryLoader::new(fixture_store());

    let first = loader.load();
    let second = loader.load();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn invalid_record_among_valid_records_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..10 {
        let content = if i == 4 {
            "{\"stress\": ".to_string()
        } else {
            stress_record(1000 + i, 100.0)
        };
        std::fs::write(dir.path().join(format!("{i:03}.json")), content).unwrap();
    }

    let window = HistoryLoader::new(dir.path()).load();

    assert_eq!(window.len(), 9);
    assert!(window.runs().iter().all(|run| run.run_id != "004"));
}

#[test]
fn invalid_record_inside_the_window_shrinks_it() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..11 {
        let content = if i == 5 {
            "not json".to_string()
        } else {
            stress_record(1000 + i, 100.0)
        };
        std::fs::write(dir.path().join(format!("{i:03}.json")), content).unwrap();
    }

    let window = HistoryLoader::new(dir.path()).load();

    assert_eq!(window.len(), 9);
    assert_eq!(window.runs()[0].run_id, "001");
    assert_eq!(window.latest().map(|run| run.run_id.as_str()), Some("010"));
}

#[test]
fn window_is_bounded_and_ordered() {
    let dir = tempfile::tempdir().unwrap();
    for i in [17, 3, 24, 9, 0, 12, 21, 5, 8, 19, 1, 14, 22, 6, 11, 2, 16, 23, 4, 10, 7, 18, 13, 20, 15] {
        std::fs::write(
            dir.path().join(format!("20260101T{i:02}0000.json")),
            stress_record(i, i as f64),
        )
        .unwrap();
    }

    let window = HistoryLoader::new(dir.path()).load();

    assert_eq!(window.len(), 10);
    let ids = window
        .runs()
        .iter()
        .map(|run| run.run_id.clone())
        .collect::<Vec<_>>();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(ids.first().map(String::as_str), Some("20260101T150000"));
}

#[test]
fn two_runs_compare_by_stress_average() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.json"), stress_record(1000, 100.0)).unwrap();
    std::fs::write(dir.path().join("b.json"), stress_record(1200, 120.0)).unwrap();

    let report = summarise_history(&HistoryLoader::new(dir.path()), "now");

    let comparison = report.comparison.expect("Expected a comparison");
    assert_eq!(comparison.avg_duration_ms.delta_percent, 20.0);
    assert_eq!(comparison.avg_duration_ms.direction, Direction::Worse);
}

#[test]
fn missing_store_gives_an_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("history");

    let report = summarise_history(&HistoryLoader::new(&store), "now");

    assert!(store.is_dir());
    assert_eq!(report.run_count, 0);
    assert!(report.labels().is_empty());
    assert_eq!(report.comparison, None);
    assert!(report.history.is_empty());
    assert_eq!(report.latest, None);
}
