//! Flat CSV export of the merged table.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use health_model::{MergedRecord, merged_column_names};
use health_transform::merged_frame;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};
use crate::sink::Sink;

/// Writes merged rows to a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvExport {
    path: PathBuf,
}

impl CsvExport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> OutputError {
        OutputError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_rows(&self, file: File, df: &mut DataFrame) -> Result<()> {
        CsvWriter::new(file)
            .include_header(false)
            .finish(df)
            .map_err(|e| OutputError::Csv {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}

impl Sink for CsvExport {
    fn describe(&self) -> String {
        format!("csv {}", self.path.display())
    }

    /// Truncates the file down to the header row.
    fn clear(&mut self) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        let mut file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        writeln!(file, "{}", merged_column_names().join(",")).map_err(|e| self.io_error(e))
    }

    fn append(&mut self, records: &[MergedRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let mut df = merged_frame(records)?;
        self.write_rows(file, &mut df)?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_header_matches_sink_order() {
        let dir = TempDir::new().unwrap();
        let mut export = CsvExport::new(dir.path().join("out").join("merged.csv"));

        export.replace(&[]).unwrap();

        let content = fs::read_to_string(export.path()).unwrap();
        assert_eq!(
            content.trim_end(),
            "Year,State,Deaths,Age_Adjusted_Death_Rate,Topic,ChronicDiseaseValue,GeoLocation"
        );
    }

    #[test]
    fn test_rows_follow_header() {
        let dir = TempDir::new().unwrap();
        let mut export = CsvExport::new(dir.path().join("merged.csv"));
        let record = MergedRecord {
            year: 2010,
            state: "Alabama".to_string(),
            deaths: 1000,
            age_adjusted_death_rate: 15.3,
            topic: "Cardiovascular Disease".to_string(),
            chronic_disease_value: 15.3,
            geo_location: None,
        };

        export.replace(&[record.clone()]).unwrap();
        export.replace(&[record]).unwrap();

        let content = fs::read_to_string(export.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2010,Alabama,1000,15.3,Cardiovascular Disease,15.3,");
    }

    #[test]
    fn test_append_requires_cleared_file() {
        let dir = TempDir::new().unwrap();
        let mut export = CsvExport::new(dir.path().join("missing.csv"));
        let record = MergedRecord {
            year: 2010,
            state: "Ohio".to_string(),
            deaths: 1,
            age_adjusted_death_rate: 1.0,
            topic: "Cancer".to_string(),
            chronic_disease_value: 1.0,
            geo_location: None,
        };

        assert!(matches!(
            export.append(&[record]),
            Err(OutputError::Io { .. })
        ));
    }
}
