//! Schema adaptation for datasets with heterogeneous layouts.
//!
//! The five datasets disagree about which columns exist and what they are
//! called. Instead of probing the column set at every use site, the
//! capabilities of a loaded table are computed once into a
//! [`SchemaProfile`] and threaded through filtering, metrics and chart
//! derivation.

use crate::types::Table;

/// Canonical name of the temporal column after header normalization.
pub const TEMPORAL_COLUMN: &str = "Year";

/// Accepted geographic column names, in detection order. The combined
/// region/country form is probed first: datasets that carry both levels in
/// one column take precedence over plain country columns.
const GEOGRAPHIC_COLUMNS: [&str; 2] = ["Country/Region", "Country"];

/// What a loaded table is capable of, computed once per cycle.
///
/// The numeric column set is pinned here, on the full table, so that
/// filtering rows never re-classifies a column mid-cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaProfile {
    pub temporal: Option<String>,
    pub geographic: Option<String>,
    pub numeric: Vec<String>,
}

impl SchemaProfile {
    pub fn of(table: &Table) -> Self {
        SchemaProfile {
            temporal: detect_temporal_column(table),
            geographic: detect_geographic_column(table),
            numeric: numeric_columns(table),
        }
    }

    pub fn has_geographic(&self) -> bool {
        self.geographic.is_some()
    }
}

/// The column named `Year`, if the table has one.
pub fn detect_temporal_column(table: &Table) -> Option<String> {
    table
        .columns
        .iter()
        .find(|c| c.as_str() == TEMPORAL_COLUMN)
        .cloned()
}

/// First match of `Country/Region` then `Country`; `None` when neither
/// exists.
pub fn detect_geographic_column(table: &Table) -> Option<String> {
    GEOGRAPHIC_COLUMNS
        .iter()
        .find(|name| table.column_index(name).is_some())
        .map(|name| name.to_string())
}

/// All numeric columns in their original order.
///
/// A column is numeric when every non-missing cell parsed as a number; a
/// column of only missing cells counts too (it sums to zero). The `Year`
/// column is not special-cased out of this set.
pub fn numeric_columns(table: &Table) -> Vec<String> {
    table
        .columns
        .iter()
        .enumerate()
        .filter(|(idx, _)| column_is_numeric(table, *idx))
        .map(|(_, name)| name.clone())
        .collect()
}

fn column_is_numeric(table: &Table, idx: usize) -> bool {
    table
        .rows
        .iter()
        .filter_map(|row| row.get(idx))
        .all(|cell| cell.is_missing() || cell.as_f64().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn combined_region_column_wins_over_country() {
        let t = table(&["Country", "Country/Region", "Year"], vec![]);
        assert_eq!(
            detect_geographic_column(&t),
            Some("Country/Region".to_string())
        );
    }

    #[test]
    fn plain_country_column_is_second_choice() {
        let t = table(&["Country", "Year"], vec![]);
        assert_eq!(detect_geographic_column(&t), Some("Country".to_string()));
        assert_eq!(detect_temporal_column(&t), Some("Year".to_string()));
    }

    #[test]
    fn absent_columns_detect_as_none() {
        let t = table(&["City", "Pm2.5"], vec![]);
        let profile = SchemaProfile::of(&t);
        assert!(profile.temporal.is_none());
        assert!(!profile.has_geographic());
    }

    #[test]
    fn numeric_classification_ignores_missing_but_not_text() {
        let t = table(
            &["Country", "Year", "Deaths", "Notes"],
            vec![
                vec![
                    Value::Text("USA".into()),
                    Value::Int(2020),
                    Value::Missing,
                    Value::Missing,
                ],
                vec![
                    Value::Text("India".into()),
                    Value::Int(2021),
                    Value::Float(1.5),
                    Value::Text("revised".into()),
                ],
            ],
        );
        assert_eq!(numeric_columns(&t), vec!["Year", "Deaths"]);
    }

    #[test]
    fn all_missing_column_counts_as_numeric() {
        let t = table(
            &["Country", "Cases"],
            vec![vec![Value::Text("USA".into()), Value::Missing]],
        );
        assert_eq!(numeric_columns(&t), vec!["Cases"]);
    }
}
