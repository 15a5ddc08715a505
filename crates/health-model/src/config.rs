//! Pipeline configuration.
//!
//! Every key is optional; omitted keys fall back to the published CDC
//! download locations and the study's fixed column lists and mapping.
//!
//! ```toml
//! [sources]
//! chronic_path = "data/downloaded_US_Chronic.csv"
//!
//! [output]
//! table = "Merged_Data"
//!
//! [mapping]
//! "Cancer" = "Cancer"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::columns::{CHRONIC_RENAMES, MORTALITY_RENAMES, canonical};
use crate::error::{ConfigError, Result};
use crate::mapping::TopicCauseMapping;
use crate::schema::{DEFAULT_TABLE_NAME, validate_table_name};

pub const CHRONIC_URL: &str =
    "https://data.cdc.gov/api/views/g4ie-h725/rows.csv?accessType=DOWNLOAD";
pub const MORTALITY_URL: &str =
    "https://data.cdc.gov/api/views/bi63-dtpu/rows.csv?accessType=DOWNLOAD";

/// Where the raw files come from and where they are kept on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub chronic_path: PathBuf,
    pub mortality_path: PathBuf,
    pub chronic_url: String,
    pub mortality_url: String,
    /// HTTP timeout for the raw fetch, in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            chronic_path: PathBuf::from("data/downloaded_US_Chronic.csv"),
            mortality_path: PathBuf::from("data/downloaded_NCHS.csv"),
            chronic_url: CHRONIC_URL.to_string(),
            mortality_url: MORTALITY_URL.to_string(),
            timeout_secs: 300,
        }
    }
}

/// Sink destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub database: PathBuf,
    pub table: String,
    pub csv: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("data/processed_data.db"),
            table: DEFAULT_TABLE_NAME.to_string(),
            csv: PathBuf::from("data/merged_data.csv"),
        }
    }
}

/// Column subsets read from each source and the null-check lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Raw chronic headers to load; each must be present in the file.
    pub chronic: Vec<String>,
    /// Raw mortality headers to load; each must be present in the file.
    pub mortality: Vec<String>,
    /// Canonical fields that must be non-null once topics are mapped.
    pub required_after_filter: Vec<String>,
    /// Canonical fields that must be non-null after the join.
    pub required_after_join: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            chronic: CHRONIC_RENAMES
                .iter()
                .map(|(raw, _)| (*raw).to_string())
                .collect(),
            mortality: MORTALITY_RENAMES
                .iter()
                .map(|(raw, _)| (*raw).to_string())
                .collect(),
            required_after_filter: [
                canonical::YEAR,
                canonical::STATE,
                canonical::TOPIC,
                canonical::CHRONIC_DISEASE_VALUE,
                canonical::CAUSE_NAME,
            ]
            .map(String::from)
            .to_vec(),
            required_after_join: [canonical::DEATHS, canonical::AGE_ADJUSTED_DEATH_RATE]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Complete, externally supplied pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sources: SourceConfig,
    pub output: OutputConfig,
    pub columns: ColumnConfig,
    pub mapping: TopicCauseMapping,
}

impl PipelineConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.mapping.is_empty() {
            return Err(ConfigError::EmptyMapping);
        }
        if self.columns.chronic.is_empty() {
            return Err(ConfigError::EmptyColumnList { list: "chronic" });
        }
        if self.columns.mortality.is_empty() {
            return Err(ConfigError::EmptyColumnList { list: "mortality" });
        }
        validate_table_name(&self.output.table)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn defaults_follow_the_published_sources() {
        let config = PipelineConfig::default();
        assert_eq!(config.output.table, "Merged_Data");
        assert_eq!(config.columns.chronic.len(), 8);
        assert_eq!(config.columns.mortality[2], "Cause Name");
        assert_eq!(
            config.columns.required_after_join,
            vec!["Deaths", "Age_Adjusted_Death_Rate"]
        );
        assert_eq!(config.mapping, TopicCauseMapping::standard());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let file = write_config(
            r#"
[output]
table = "Fact_Table"

[mapping]
"Cancer" = "Cancer"
"#,
        );
        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.output.table, "Fact_Table");
        assert_eq!(config.output.csv, PathBuf::from("data/merged_data.csv"));
        assert_eq!(config.mapping.len(), 1);
        assert_eq!(config.sources.chronic_url, CHRONIC_URL);
    }

    #[test]
    fn invalid_table_name_is_rejected() {
        let file = write_config("[output]\ntable = \"bad name\"\n");
        let err = PipelineConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTableName { .. }));
    }

    #[test]
    fn empty_mapping_is_rejected() {
        let file = write_config("[mapping]\n");
        let err = PipelineConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyMapping));
    }

    #[test]
    fn malformed_toml_reports_path() {
        let file = write_config("[output\n");
        let err = PipelineConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().contains("failed to parse TOML config"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PipelineConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
