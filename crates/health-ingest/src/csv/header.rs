//! CSV header inspection.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Normalizes a header value: strips a UTF-8 BOM and surrounding whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Reads only the header row of a CSV file.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Header {
            path: path.to_path_buf(),
            source,
        })?;
    let headers = reader.headers().map_err(|source| IngestError::Header {
        path: path.to_path_buf(),
        source,
    })?;
    let columns: Vec<String> = headers.iter().map(normalize_header).collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(columns)
}

/// Returns the required columns that are absent from `headers`, in request order.
pub fn missing_columns(headers: &[String], required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !headers.iter().any(|header| header == *name))
        .cloned()
        .collect()
}
