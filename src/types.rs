use serde::Serialize;
use std::fmt;

/// A single typed cell of a loaded dataset.
///
/// Cell types are inferred per value at load time; a column's overall
/// classification (numeric or not) is derived later by the schema adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the cell, `None` for text or missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Year view of the cell. Whole-number floats count (`2020.0` is a
    /// valid year in loosely typed exports), fractional values do not.
    pub fn as_year(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Text view of the cell, `None` for numeric or missing cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Missing => Ok(()),
        }
    }
}

/// In-memory tabular data: named columns over rows of typed cells.
///
/// Invariant: every row holds exactly `columns.len()` cells; the loader
/// pads short rows and truncates long ones. Tables are never mutated after
/// load; filters return fresh tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// New table with the same columns and only the rows matching `keep`.
    pub fn filtered<F>(&self, keep: F) -> Table
    where
        F: Fn(&[Value]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }
}

/// One headline metric card: a numeric column and its sum over the
/// filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
}

/// A single point of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i64,
    pub value: f64,
}

/// One line of the trend chart. `key` is the geographic entity the series
/// belongs to, or `None` when the dataset has no geographic column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub key: Option<String>,
    pub points: Vec<TrendPoint>,
}

/// One bar of the ranking chart: a geographic key and its aggregated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub key: String,
    pub value: f64,
}

/// One choropleth entry. Keys are passed through verbatim; names the
/// downstream map layer cannot place are silently left uncolored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionValue {
    pub key: String,
    pub value: f64,
}
