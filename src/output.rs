use crate::error::DatasetError;
use crate::types::{Metric, RankingRow, Table};
use crate::util::format_number;
use serde::Serialize;
use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::debug;

/// Render the first `max_rows` rows as a markdown table string.
///
/// Datasets have arbitrary columns, so the table is assembled dynamically
/// instead of via derive. Missing cells render as empty strings.
pub fn preview_table(table: &Table, max_rows: usize) -> String {
    if table.is_empty() {
        return "(no rows)".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().cloned());
    for row in table.rows.iter().take(max_rows) {
        builder.push_record(row.iter().map(|cell| cell.to_string()));
    }
    builder.build().with(Style::markdown()).to_string()
}

/// One row of metric cards: column names over their formatted sums.
pub fn metric_cards(metrics: &[Metric]) -> String {
    let mut builder = Builder::default();
    builder.push_record(metrics.iter().map(|m| m.name.clone()));
    builder.push_record(metrics.iter().map(|m| format_number(m.value, 0)));
    builder.build().with(Style::markdown()).to_string()
}

/// Ranking preview with a rank column, mirroring the bar chart order.
pub fn ranking_table(rows: &[RankingRow]) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(["Rank", "Key", "Value"]);
    for (idx, row) in rows.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            row.key.clone(),
            format_number(row.value, 2),
        ]);
    }
    builder.build().with(Style::markdown()).to_string()
}

/// Export the filtered view as CSV, cells rendered the way the preview
/// shows them.
pub fn write_table_csv(path: impl AsRef<Path>, table: &Table) -> Result<(), DatasetError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    wtr.flush()?;
    debug!(path = %path.as_ref().display(), rows = table.len(), "filtered view exported");
    Ok(())
}

/// Pretty-printed JSON export for chart specs and summaries.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), DatasetError> {
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path.as_ref(), body)?;
    debug!(path = %path.as_ref().display(), "chart spec exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn sample() -> Table {
        Table {
            columns: vec!["Country".into(), "Deaths".into()],
            rows: vec![
                vec![Value::Text("USA".into()), Value::Int(100)],
                vec![Value::Text("India".into()), Value::Missing],
            ],
        }
    }

    #[test]
    fn preview_contains_headers_and_truncates() {
        let rendered = preview_table(&sample(), 1);
        assert!(rendered.contains("Country"));
        assert!(rendered.contains("USA"));
        assert!(!rendered.contains("India"));
    }

    #[test]
    fn empty_preview_says_so() {
        let empty = Table {
            columns: vec!["Country".into()],
            rows: vec![],
        };
        assert_eq!(preview_table(&empty, 15), "(no rows)");
    }

    #[test]
    fn metric_cards_format_values() {
        let cards = metric_cards(&[Metric {
            name: "Deaths".into(),
            value: 1234567.0,
        }]);
        assert!(cards.contains("Deaths"));
        assert!(cards.contains("1,234,567"));
    }

    #[test]
    fn table_csv_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.csv");
        write_table_csv(&path, &sample()).unwrap();
        let reloaded = crate::loader::load(&path).unwrap();
        assert_eq!(reloaded.columns, sample().columns);
        assert_eq!(reloaded.rows[1][1], Value::Missing);
    }
}
