//! Shared data model for the chronic disease / mortality merge pipeline.

pub mod columns;
pub mod config;
pub mod error;
pub mod mapping;
pub mod records;
pub mod schema;

pub use config::{ColumnConfig, OutputConfig, PipelineConfig, SourceConfig};
pub use error::{ConfigError, Result};
pub use mapping::{STANDARD_TOPIC_CAUSES, TopicCauseMapping};
pub use records::{CauseRecord, ChronicRecord, MergedRecord};
pub use schema::{
    DEFAULT_TABLE_NAME, MERGED_SCHEMA, SinkColumn, SqlType, create_table_sql, drop_table_sql,
    merged_column_names, validate_table_name,
};
