//! Post-run checks over the relational sink.

use std::path::{Path, PathBuf};

use health_model::{MERGED_SCHEMA, validate_table_name};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};

use crate::error::Result;

/// One named check and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl Check {
    fn new(name: &'static str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed,
            detail: detail.into(),
        }
    }
}

/// Outcome of verifying a database.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub database: PathBuf,
    pub table: String,
    pub row_count: Option<i64>,
    pub checks: Vec<Check>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|check| check.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|check| !check.passed)
    }
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn declared_columns(conn: &Connection, table: &str) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?))
    })?;
    let mut columns = Vec::new();
    for row in rows {
        columns.push(row?);
    }
    Ok(columns)
}

fn schema_check(columns: &[(String, String)]) -> Check {
    let expected: Vec<(String, String)> = MERGED_SCHEMA
        .iter()
        .map(|column| (column.name.to_string(), column.sql_type.to_string()))
        .collect();
    let actual: Vec<(String, String)> = columns
        .iter()
        .map(|(name, ty)| (name.clone(), ty.to_uppercase()))
        .collect();
    if actual == expected {
        return Check::new("columns", true, format!("{} columns match", expected.len()));
    }
    let describe = |cols: &[(String, String)]| {
        cols.iter()
            .map(|(name, ty)| format!("{name} {ty}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    Check::new(
        "columns",
        false,
        format!("expected [{}], found [{}]", describe(&expected), describe(&actual)),
    )
}

/// Opens the database read-only and checks the merged table.
///
/// Failed checks are reported, not raised; an error means the database could
/// not be queried at all.
pub fn verify_database(path: &Path, table: &str) -> Result<VerificationReport> {
    validate_table_name(table)?;
    let mut report = VerificationReport {
        database: path.to_path_buf(),
        table: table.to_string(),
        row_count: None,
        checks: Vec::new(),
    };

    if !path.is_file() {
        report
            .checks
            .push(Check::new("database", false, "file not found"));
        return Ok(report);
    }
    report.checks.push(Check::new("database", true, "file present"));

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    if !table_exists(&conn, table)? {
        report
            .checks
            .push(Check::new("table", false, format!("{table} does not exist")));
        return Ok(report);
    }
    report
        .checks
        .push(Check::new("table", true, format!("{table} exists")));

    let columns = declared_columns(&conn, table)?;
    let schema = schema_check(&columns);
    let schema_ok = schema.passed;
    report.checks.push(schema);

    let rows: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    report.row_count = Some(rows);
    report
        .checks
        .push(Check::new("rows", rows > 0, format!("{rows} row(s)")));

    if schema_ok {
        for column in MERGED_SCHEMA.iter().filter(|column| column.required) {
            let nulls: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE {} IS NULL", column.name),
                [],
                |row| row.get(0),
            )?;
            report.checks.push(Check::new(
                "not null",
                nulls == 0,
                format!("{}: {nulls} null(s)", column.name),
            ));
        }
    }

    tracing::debug!(
        database = %path.display(),
        table,
        passed = report.passed(),
        "verified database"
    );
    Ok(report)
}
