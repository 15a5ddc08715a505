//! Destination schema owned by the pipeline core.
//!
//! Both sinks (relational table and flat export) write exactly these columns
//! in exactly this order.

use std::fmt;

use crate::columns::canonical;
use crate::error::{ConfigError, Result};

/// SQLite storage class declared for a sink column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Real,
    Text,
}

impl SqlType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of the destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkColumn {
    pub name: &'static str,
    pub sql_type: SqlType,
    /// Whether the merge guarantees a value in every row.
    pub required: bool,
}

impl SinkColumn {
    const fn required(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            required: true,
        }
    }

    const fn optional(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            required: false,
        }
    }
}

/// Default name of the relational table.
pub const DEFAULT_TABLE_NAME: &str = "Merged_Data";

/// Column contract of the merged table.
pub const MERGED_SCHEMA: [SinkColumn; 7] = [
    SinkColumn::required(canonical::YEAR, SqlType::Integer),
    SinkColumn::required(canonical::STATE, SqlType::Text),
    SinkColumn::required(canonical::DEATHS, SqlType::Integer),
    SinkColumn::required(canonical::AGE_ADJUSTED_DEATH_RATE, SqlType::Real),
    SinkColumn::required(canonical::TOPIC, SqlType::Text),
    SinkColumn::required(canonical::CHRONIC_DISEASE_VALUE, SqlType::Real),
    SinkColumn::optional(canonical::GEO_LOCATION, SqlType::Text),
];

/// Merged column names in sink order.
pub fn merged_column_names() -> Vec<&'static str> {
    MERGED_SCHEMA.iter().map(|column| column.name).collect()
}

/// Rejects anything but a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
///
/// Table names are interpolated into DDL, so they cannot be bound as parameters.
pub fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidTableName {
            name: name.to_string(),
        })
    }
}

/// `CREATE TABLE` statement for the merged table.
pub fn create_table_sql(table: &str) -> Result<String> {
    validate_table_name(table)?;
    let columns: Vec<String> = MERGED_SCHEMA
        .iter()
        .map(|column| format!("    {} {}", column.name, column.sql_type))
        .collect();
    Ok(format!("CREATE TABLE {table} (\n{}\n);", columns.join(",\n")))
}

/// `DROP TABLE IF EXISTS` statement for the merged table.
pub fn drop_table_sql(table: &str) -> Result<String> {
    validate_table_name(table)?;
    Ok(format!("DROP TABLE IF EXISTS {table};"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_table_name("Merged_Data").is_ok());
        assert!(validate_table_name("_staging2").is_ok());
    }

    #[test]
    fn rejects_injection_and_odd_names() {
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("2020_data").is_err());
        assert!(validate_table_name("Merged Data").is_err());
        assert!(validate_table_name("x; DROP TABLE y").is_err());
    }

    #[test]
    fn geo_location_is_the_only_optional_column() {
        let optional: Vec<&str> = MERGED_SCHEMA
            .iter()
            .filter(|column| !column.required)
            .map(|column| column.name)
            .collect();
        assert_eq!(optional, vec!["GeoLocation"]);
    }
}
