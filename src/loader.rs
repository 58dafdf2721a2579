use crate::error::DatasetError;
use crate::types::{Table, Value};
use crate::util::{normalize_header, parse_value};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Read a dataset CSV into a [`Table`].
///
/// Column names come back normalized (trimmed, title-cased) and every row
/// is widened or truncated to the header width so downstream code can
/// index cells by column position without bounds anxiety.
///
/// A missing or unreadable file is [`DatasetError::NotFound`]; the caller
/// aborts the render cycle rather than continuing with partial data.
pub fn load(path: impl AsRef<Path>) -> Result<Table, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);
    let columns: Vec<String> = rdr.headers()?.iter().map(normalize_header).collect();
    let width = columns.len();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut cells: Vec<Value> = record.iter().take(width).map(parse_value).collect();
        cells.resize(width, Value::Missing);
        rows.push(cells);
    }

    info!(
        path = %path.display(),
        rows = rows.len(),
        columns = width,
        "dataset loaded"
    );
    Ok(Table { columns, rows })
}
