use crate::history::HistoryRow;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct HistoryTableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Requests")]
    requests: u64,
    #[tabled(rename = "Error Rate")]
    error_rate: String,
    #[tabled(rename = "Avg")]
    avg: String,
    #[tabled(rename = "Median")]
    median: String,
    #[tabled(rename = "P95")]
    p95: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "RPS")]
    rps: String,
    #[tabled(rename = "Data")]
    data: String,
}

impl From<&HistoryRow> for HistoryTableRow {
    fn from(row: &HistoryRow) -> Self {
        Self {
            date: row.date.clone(),
            kind: row.kind.label(),
            requests: row.requests,
            error_rate: format!("{:.2}%", row.error_rate_percent),
            avg: ms(row.avg_duration_ms),
            median: ms(row.med_duration_ms),
            p95: ms(row.p95_duration_ms),
            max: ms(row.max_duration_ms),
            rps: format!("{:.2}", row.rps),
            data: format!("{:.2}MB", row.data_received_mb),
        }
    }
}

fn ms(n: f64) -> String {
    format!("{:.2}ms", n)
}

/// Render history rows as a text table for the terminal
pub fn render_history_table(rows: &[HistoryRow]) -> String {
    let rows = rows.iter().map(HistoryTableRow::from).collect::<Vec<_>>();

    let mut table = Table::new(&rows);
    table.with(Style::modern());

    table.to_string()
}
