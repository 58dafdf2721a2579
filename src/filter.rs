//! Row filtering over a loaded table.
//!
//! Both filters are pure: the input table is never touched and a fresh
//! table comes back. They are composed in a fixed order (year range first,
//! then country substring) so a repeated cycle with the same inputs always
//! walks the same path.

use crate::schema::SchemaProfile;
use crate::types::Table;
use tracing::debug;

/// The user's filter choices for one render cycle. Rebuilt from input on
/// every cycle, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub year_range: Option<(i64, i64)>,
    pub country_contains: Option<String>,
}

impl FilterState {
    /// Apply whichever filters the schema supports, year first.
    ///
    /// A requested filter whose column is absent is skipped entirely; the
    /// shell is responsible for telling the user why.
    pub fn apply(&self, table: &Table, profile: &SchemaProfile) -> Table {
        let mut out = match (&self.year_range, &profile.temporal) {
            (Some((min, max)), Some(col)) => apply_year_filter(table, col, *min, *max),
            _ => table.clone(),
        };
        if let (Some(needle), Some(col)) = (&self.country_contains, &profile.geographic) {
            out = apply_country_filter(&out, col, needle);
        }
        debug!(before = table.len(), after = out.len(), "filters applied");
        out
    }
}

/// Keep rows whose year cell lies in `min..=max` (inclusive on both ends).
/// Rows with a missing or non-numeric year are dropped.
pub fn apply_year_filter(table: &Table, temporal_col: &str, min: i64, max: i64) -> Table {
    let Some(idx) = table.column_index(temporal_col) else {
        return table.clone();
    };
    table.filtered(|row| {
        row.get(idx)
            .and_then(|cell| cell.as_f64())
            .map_or(false, |y| y >= min as f64 && y <= max as f64)
    })
}

/// Keep rows whose geographic cell contains `needle`, case-insensitively.
/// Missing values never match and never raise.
pub fn apply_country_filter(table: &Table, geographic_col: &str, needle: &str) -> Table {
    let Some(idx) = table.column_index(geographic_col) else {
        return table.clone();
    };
    let needle = needle.to_lowercase();
    table.filtered(|row| {
        row.get(idx)
            .and_then(|cell| cell.as_text())
            .map_or(false, |name| name.to_lowercase().contains(&needle))
    })
}

/// True min/max of the temporal column, or `None` when the table has no
/// usable year cells. Equal bounds mean the range selector is
/// informational only.
pub fn year_bounds(table: &Table, temporal_col: &str) -> Option<(i64, i64)> {
    let idx = table.column_index(temporal_col)?;
    let mut bounds: Option<(f64, f64)> = None;
    for row in &table.rows {
        if let Some(y) = row.get(idx).and_then(|cell| cell.as_f64()) {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(y), hi.max(y)),
                None => (y, y),
            });
        }
    }
    bounds.map(|(lo, hi)| (lo as i64, hi as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn sample() -> Table {
        Table {
            columns: vec!["Country".into(), "Year".into(), "Deaths".into()],
            rows: vec![
                vec![Value::Text("USA".into()), Value::Int(2020), Value::Int(100)],
                vec![Value::Text("USA".into()), Value::Int(2021), Value::Int(150)],
                vec![Value::Text("India".into()), Value::Int(2020), Value::Int(200)],
                vec![Value::Missing, Value::Int(2020), Value::Int(50)],
            ],
        }
    }

    #[test]
    fn year_filter_is_inclusive_both_ends() {
        let t = sample();
        let out = apply_year_filter(&t, "Year", 2020, 2020);
        assert_eq!(out.len(), 3);
        let out = apply_year_filter(&t, "Year", 2020, 2021);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn year_filter_with_true_bounds_is_identity() {
        let t = sample();
        let (lo, hi) = year_bounds(&t, "Year").unwrap();
        let out = apply_year_filter(&t, "Year", lo, hi);
        assert_eq!(out, t);
    }

    #[test]
    fn country_filter_is_case_insensitive() {
        let t = sample();
        let lower = apply_country_filter(&t, "Country", "usa");
        let upper = apply_country_filter(&t, "Country", "USA");
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 2);
    }

    #[test]
    fn missing_geographic_cells_never_match() {
        let t = sample();
        // empty needle is a substring of every present name, but the row
        // with a missing country still has to be excluded
        let out = apply_country_filter(&t, "Country", "");
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn filters_do_not_mutate_input() {
        let t = sample();
        let snapshot = t.clone();
        let _ = apply_year_filter(&t, "Year", 2021, 2021);
        let _ = apply_country_filter(&t, "Country", "ind");
        assert_eq!(t, snapshot);
    }

    #[test]
    fn unmatched_substring_leaves_no_rows() {
        let t = sample();
        let out = apply_country_filter(&t, "Country", "xyz");
        assert!(out.is_empty());
        assert_eq!(out.columns, t.columns);
    }

    #[test]
    fn degenerate_bounds_collapse_to_one_year() {
        let t = Table {
            columns: vec!["Year".into()],
            rows: vec![vec![Value::Int(2019)], vec![Value::Int(2019)]],
        };
        assert_eq!(year_bounds(&t, "Year"), Some((2019, 2019)));
    }

    #[test]
    fn bounds_skip_missing_and_text_cells() {
        let t = Table {
            columns: vec!["Year".into()],
            rows: vec![
                vec![Value::Missing],
                vec![Value::Text("unknown".into())],
                vec![Value::Int(2021)],
            ],
        };
        assert_eq!(year_bounds(&t, "Year"), Some((2021, 2021)));
        let none = Table {
            columns: vec!["Year".into()],
            rows: vec![vec![Value::Missing]],
        };
        assert_eq!(year_bounds(&none, "Year"), None);
    }

    #[test]
    fn state_applies_year_then_country() {
        let t = sample();
        let profile = SchemaProfile::of(&t);
        let state = FilterState {
            year_range: Some((2020, 2020)),
            country_contains: Some("IND".into()),
        };
        let out = state.apply(&t, &profile);
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows[0][0], Value::Text("India".into()));
    }
}
