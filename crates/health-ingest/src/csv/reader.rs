//! CSV file reading restricted to a caller-specified column subset.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use polars::prelude::{CsvReadOptions, DataFrame, PlSmallStr, SerReader};

use crate::error::{IngestError, Result};

use super::header::{missing_columns, read_csv_headers};

/// Reads a CSV file into a DataFrame holding exactly `columns`, in that order.
///
/// Every cell is loaded as text; empty cells become null. Typing is left to
/// the caller so that unparsable values can be absorbed as nulls instead of
/// failing the read.
///
/// Fails with [`IngestError::MissingColumns`] when any requested column is not
/// present in the header row. Missing columns are never substituted.
pub fn read_csv_table(path: &Path, columns: &[String]) -> Result<DataFrame> {
    let start = Instant::now();
    let headers = read_csv_headers(path)?;
    let missing = missing_columns(&headers, columns);
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    let projection: Arc<[PlSmallStr]> = columns
        .iter()
        .map(|name| PlSmallStr::from(name.as_str()))
        .collect();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_columns(Some(projection))
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let df = df.select(columns.iter().map(String::as_str))?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "read csv table"
    );

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn names(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn test_reads_only_requested_columns_in_order() {
        let file = create_temp_csv(
            "Year,113 Cause Name,Cause Name,State,Deaths,Age-adjusted Death Rate\n\
             2017,x,Cancer,Alabama,10000,170.5\n\
             2017,y,Diabetes,Alabama,1500,25.1\n",
        );
        let df = read_csv_table(
            file.path(),
            &names(&["State", "Year", "Cause Name", "Deaths"]),
        )
        .unwrap();

        let columns: Vec<&str> = df.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(columns, vec!["State", "Year", "Cause Name", "Deaths"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_cells_are_read_as_text() {
        let file = create_temp_csv("Year,Deaths\n2017,10000\n2018,\n");
        let df = read_csv_table(file.path(), &names(&["Year", "Deaths"])).unwrap();

        let deaths = df.column("Deaths").unwrap().str().unwrap();
        assert_eq!(deaths.get(0), Some("10000"));
        assert_eq!(deaths.get(1), None);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let file = create_temp_csv(
            "Topic,Question\nCancer,\"Cancer of the lung, mortality\"\n",
        );
        let df = read_csv_table(file.path(), &names(&["Question"])).unwrap();
        let question = df.column("Question").unwrap().str().unwrap();
        assert_eq!(question.get(0), Some("Cancer of the lung, mortality"));
    }

    #[test]
    fn test_missing_required_column_fails() {
        let file = create_temp_csv("Year,State\n2017,Alabama\n");
        let err = read_csv_table(file.path(), &names(&["Year", "Deaths", "State"])).unwrap_err();
        match err {
            IngestError::MissingColumns { columns, .. } => assert_eq!(columns, vec!["Deaths"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_file_is_empty_table() {
        let file = create_temp_csv("Year,State\n");
        let df = read_csv_table(file.path(), &names(&["Year", "State"])).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_absent_file() {
        let err = read_csv_table(Path::new("/no/such/file.csv"), &names(&["Year"])).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
