//! CSV export: flattens records into semicolon-delimited rows.
//!
//! The header is the first record's field names, in server order. Later
//! records are written against that header: a missing field becomes an empty
//! cell, an extra field is an error.

use crate::record::Record;
use crate::source::FetchError;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

pub const DELIMITER: u8 = b';';

/// Write records as CSV to any writer. Returns the number of data rows.
///
/// Writes nothing at all, not even a header, when `records` is empty.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<usize, FetchError> {
    let Some(first) = records.first() else {
        return Ok(0);
    };
    let header: Vec<&str> = first.keys().map(|k| k.as_str()).collect();

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);
    wtr.write_record(&header).map_err(csv_error)?;

    for (i, record) in records.iter().enumerate() {
        if let Some(extra) = record.keys().find(|k| !first.contains_key(k.as_str())) {
            return Err(FetchError::Export(format!(
                "record {i} has field '{extra}' not present in header"
            )));
        }
        let row: Vec<String> = header
            .iter()
            .map(|name| record.get(*name).map(render_value).unwrap_or_default())
            .collect();
        wtr.write_record(&row).map_err(csv_error)?;
    }

    wtr.flush()?;
    Ok(records.len())
}

/// Write records to a CSV file at `path`.
///
/// Returns `Ok(false)` without touching the filesystem when there is nothing
/// to write. Rows are rendered in memory first, so a record that does not fit
/// the header leaves no file behind.
pub fn export_csv(path: &Path, records: &[Record]) -> Result<bool, FetchError> {
    if records.is_empty() {
        return Ok(false);
    }
    let mut buf = Vec::new();
    write_records(&mut buf, records)?;
    std::fs::write(path, buf)?;
    Ok(true)
}

/// Render a JSON value as a single CSV cell.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn csv_error(e: csv::Error) -> FetchError {
    FetchError::Export(e.to_string())
}
