//! CSV reading utilities.

mod header;
mod reader;

pub use header::{missing_columns, normalize_header, read_csv_headers};
pub use reader::read_csv_table;
