//! Loading of the raw chronic-indicator and mortality tables.
//!
//! Tables are read with every requested column as text; typing happens in
//! [`coerce`] so that a malformed cell turns into a null instead of a parse
//! failure. [`fetch`] refreshes the local copies from their published URLs.

pub mod coerce;
mod csv;
mod error;
pub mod fetch;

pub use coerce::{coerce_columns, float_column, int_column, parse_count, parse_decimal};
pub use self::csv::{missing_columns, normalize_header, read_csv_headers, read_csv_table};
pub use error::{IngestError, Result};
pub use fetch::{
    DEFAULT_TIMEOUT, FetchError, FetchOptions, FetchOutcome, download_and_save, fetch_to_path,
};
