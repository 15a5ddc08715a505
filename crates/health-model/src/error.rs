use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("topic to cause mapping is empty")]
    EmptyMapping,

    #[error("column list `{list}` is empty")]
    EmptyColumnList { list: &'static str },

    #[error("invalid table name '{name}': expected letters, digits and underscores")]
    InvalidTableName { name: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
