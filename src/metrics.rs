//! Headline metrics over the filtered table.

use crate::schema::SchemaProfile;
use crate::types::{Metric, Table};

/// How many metric cards the dashboard shows at most.
pub const MAX_METRICS: usize = 4;

/// Column-wise sums for the first four numeric columns of the profile, in
/// their original column order.
///
/// Missing cells are excluded from the sums rather than counted as zero;
/// over an empty table every sum is 0.0. Datasets with no numeric columns
/// yield an empty vec and the shell shows a "no metrics" notice instead.
pub fn summarize(table: &Table, profile: &SchemaProfile) -> Vec<Metric> {
    profile
        .numeric
        .iter()
        .take(MAX_METRICS)
        .filter_map(|name| {
            let idx = table.column_index(name)?;
            let value: f64 = table
                .rows
                .iter()
                .filter_map(|row| row.get(idx).and_then(|cell| cell.as_f64()))
                .sum();
            Some(Metric {
                name: name.clone(),
                value,
            })
        })
        .collect()
}
