//! Relational sink backed by a SQLite file.

use std::path::{Path, PathBuf};

use health_model::{MergedRecord, create_table_sql, drop_table_sql, validate_table_name};
use rusqlite::{Connection, params};

use crate::common::ensure_parent_dir;
use crate::error::Result;
use crate::sink::Sink;

/// Writes merged rows into one table, dropped and recreated on every clear.
pub struct SqliteSink {
    conn: Connection,
    table: String,
    location: Option<PathBuf>,
}

impl SqliteSink {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: &Path, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        ensure_parent_dir(path)?;
        let conn = Connection::open(path)?;
        Ok(Self {
            conn,
            table: table.to_string(),
            location: Some(path.to_path_buf()),
        })
    }

    /// A throwaway in-memory database.
    pub fn in_memory(table: &str) -> Result<Self> {
        validate_table_name(table)?;
        Ok(Self {
            conn: Connection::open_in_memory()?,
            table: table.to_string(),
            location: None,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Reads every row back in insertion order.
    pub fn read_all(&self) -> Result<Vec<MergedRecord>> {
        let sql = format!(
            "SELECT Year, State, Deaths, Age_Adjusted_Death_Rate, Topic, ChronicDiseaseValue, \
             GeoLocation FROM {} ORDER BY rowid",
            self.table
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(MergedRecord {
                year: row.get(0)?,
                state: row.get(1)?,
                deaths: row.get(2)?,
                age_adjusted_death_rate: row.get(3)?,
                topic: row.get(4)?,
                chronic_disease_value: row.get(5)?,
                geo_location: row.get(6)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

impl Sink for SqliteSink {
    fn describe(&self) -> String {
        match &self.location {
            Some(path) => format!("sqlite {}#{}", path.display(), self.table),
            None => format!("sqlite :memory:#{}", self.table),
        }
    }

    fn clear(&mut self) -> Result<()> {
        let ddl = format!(
            "{}\n{}",
            drop_table_sql(&self.table)?,
            create_table_sql(&self.table)?
        );
        self.conn.execute_batch(&ddl)?;
        tracing::debug!(table = %self.table, "table recreated");
        Ok(())
    }

    fn append(&mut self, records: &[MergedRecord]) -> Result<usize> {
        let sql = format!(
            "INSERT INTO {} (Year, State, Deaths, Age_Adjusted_Death_Rate, Topic, \
             ChronicDiseaseValue, GeoLocation) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            self.table
        );
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for record in records {
                stmt.execute(params![
                    record.year,
                    record.state,
                    record.deaths,
                    record.age_adjusted_death_rate,
                    record.topic,
                    record.chronic_disease_value,
                    record.geo_location,
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }
}
