//! Chart data derivations over the filtered table.
//!
//! Each derivation is independent and chart-agnostic: it produces plain
//! typed rows plus enough context for an external charting layer to render
//! a line chart, a bar ranking or a choropleth. When a dataset lacks the
//! required column the derivation returns a [`SkipReason`] and the shell
//! shows a notice while the other charts proceed.

use crate::error::SkipReason;
use crate::schema::SchemaProfile;
use crate::types::{RankingRow, RegionValue, Table, TrendPoint, TrendSeries};
use serde::Serialize;
use std::collections::HashMap;

/// How many entities the ranking keeps.
pub const RANKING_LIMIT: usize = 10;

/// Envelope written to disk for the external charting layer: one file per
/// chart, self-describing enough to render without re-deriving anything.
#[derive(Debug, Serialize)]
pub struct ChartSpec<T> {
    pub kind: &'static str,
    pub title: String,
    pub metric: String,
    pub data: T,
}

impl<T> ChartSpec<T> {
    pub fn new(kind: &'static str, title: String, metric: &str, data: T) -> Self {
        ChartSpec {
            kind,
            title,
            metric: metric.to_string(),
            data,
        }
    }
}

/// (year, value) pairs of `metric`, one series per geographic key when the
/// dataset has one, otherwise a single keyless series.
///
/// Series appear in first-encounter order of their key; points within a
/// series are sorted ascending by year, input order preserved among equal
/// years. Rows missing the year or the metric are left out.
pub fn trend(
    table: &Table,
    profile: &SchemaProfile,
    metric: &str,
) -> Result<Vec<TrendSeries>, SkipReason> {
    let temporal = profile
        .temporal
        .as_deref()
        .ok_or(SkipReason::MissingTemporalColumn)?;
    let year_idx = table
        .column_index(temporal)
        .ok_or(SkipReason::MissingTemporalColumn)?;
    let metric_idx = table
        .column_index(metric)
        .ok_or(SkipReason::NoNumericColumns)?;
    let geo_idx = profile
        .geographic
        .as_deref()
        .and_then(|col| table.column_index(col));

    let mut order: Vec<Option<String>> = Vec::new();
    let mut points: HashMap<Option<String>, Vec<TrendPoint>> = HashMap::new();
    for row in &table.rows {
        let Some(year) = row.get(year_idx).and_then(|cell| cell.as_year()) else {
            continue;
        };
        let Some(value) = row.get(metric_idx).and_then(|cell| cell.as_f64()) else {
            continue;
        };
        let key = match geo_idx {
            // with a geographic column present, rows without a readable
            // key belong to no series
            Some(gi) => match row.get(gi).and_then(|cell| cell.as_text()) {
                Some(name) => Some(name.to_string()),
                None => continue,
            },
            None => None,
        };
        let series = points.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            Vec::new()
        });
        series.push(TrendPoint { year, value });
    }

    if order.is_empty() {
        return Err(SkipReason::NoRows);
    }
    let mut out = Vec::with_capacity(order.len());
    for key in order {
        let mut series_points = points.remove(&key).unwrap_or_default();
        series_points.sort_by_key(|p| p.year);
        out.push(TrendSeries {
            key,
            points: series_points,
        });
    }
    Ok(out)
}

/// Group by geographic key, sum `metric` per group, sort descending by the
/// sum and keep the largest [`RANKING_LIMIT`] entries.
///
/// Equal sums are ordered alphabetically by key so repeated cycles rank
/// identically.
pub fn top_ranking(
    table: &Table,
    profile: &SchemaProfile,
    metric: &str,
) -> Result<Vec<RankingRow>, SkipReason> {
    let mut rows = grouped_sums(table, profile, metric)?;
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    rows.truncate(RANKING_LIMIT);
    Ok(rows
        .into_iter()
        .map(|(key, value)| RankingRow { key, value })
        .collect())
}

/// Summed `metric` per geographic key for choropleth coloring, ordered
/// alphabetically.
///
/// Keys go out verbatim: no validation, no alias resolution. Names the
/// downstream map layer cannot place are silently left unrendered.
pub fn geo_distribution(
    table: &Table,
    profile: &SchemaProfile,
    metric: &str,
) -> Result<Vec<RegionValue>, SkipReason> {
    let mut rows = grouped_sums(table, profile, metric)?;
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(rows
        .into_iter()
        .map(|(key, value)| RegionValue { key, value })
        .collect())
}

/// Shared group-by-key-and-sum over the geographic column. A key whose
/// metric cells are all missing still gets a group, summing to zero.
fn grouped_sums(
    table: &Table,
    profile: &SchemaProfile,
    metric: &str,
) -> Result<Vec<(String, f64)>, SkipReason> {
    let geographic = profile
        .geographic
        .as_deref()
        .ok_or(SkipReason::MissingGeographicColumn)?;
    let geo_idx = table
        .column_index(geographic)
        .ok_or(SkipReason::MissingGeographicColumn)?;
    let metric_idx = table
        .column_index(metric)
        .ok_or(SkipReason::NoNumericColumns)?;

    let mut sums: HashMap<String, f64> = HashMap::new();
    for row in &table.rows {
        let Some(key) = row.get(geo_idx).and_then(|cell| cell.as_text()) else {
            continue;
        };
        let entry = sums.entry(key.to_string()).or_insert(0.0);
        if let Some(value) = row.get(metric_idx).and_then(|cell| cell.as_f64()) {
            *entry += value;
        }
    }
    if sums.is_empty() {
        return Err(SkipReason::NoRows);
    }
    Ok(sums.into_iter().collect())
}
