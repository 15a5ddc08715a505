//! Transformation stages of the chronic disease / mortality pipeline.
//!
//! Each stage takes a frame and returns a new one:
//!
//! - **chronic**: type the raw indicator table, filter it, keep one row per
//!   (Year, State, Topic)
//! - **mapping**: attach the mortality cause for each topic
//! - **cause**: restrict the mortality table to mapped causes, drop duplicates
//! - **merge**: join on (Year, State, Cause_Name) and validate the output
//!
//! [`process_frames`] chains them in order.

pub mod cause;
pub mod chronic;
mod error;
pub mod frame;
pub mod frame_builder;
pub mod mapping;
pub mod merge;
mod process;

pub use cause::{normalize_causes, prepare_causes};
pub use chronic::{dedupe_indicators, filter_indicators, prepare_chronic, select_indicators};
pub use error::{Result, TransformError};
pub use frame::{drop_nulls_in, duplicate_row_count, rename_present, unique_rows};
pub use frame_builder::{cause_frame, chronic_frame, merged_frame, merged_records};
pub use mapping::{attach_causes, map_topics};
pub use merge::{NON_NULL_MERGED, check_merged, join_and_validate, join_on_cause, sort_merged};
pub use process::{ProcessedFrames, process_frames};
