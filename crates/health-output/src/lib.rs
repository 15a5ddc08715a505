//! Destinations for the merged table.
//!
//! Both sinks follow the same clear-then-append contract ([`Sink`]); the
//! relational one can be checked afterwards with [`verify_database`].

mod common;
mod csv_export;
mod error;
mod sink;
mod sqlite;
pub mod verify;

pub use common::ensure_parent_dir;
pub use csv_export::CsvExport;
pub use error::{OutputError, Result};
pub use sink::Sink;
pub use sqlite::SqliteSink;
pub use verify::{Check, VerificationReport, verify_database};

use health_model::MergedRecord;

/// Replaces the contents of every sink with `records`, stopping at the first failure.
pub fn replace_all(sinks: &mut [&mut dyn Sink], records: &[MergedRecord]) -> Result<usize> {
    let mut written = 0;
    for sink in sinks.iter_mut() {
        written = sink.replace(records)?;
    }
    Ok(written)
}
