//! The full transformation chain from raw frames to merged output.

use health_model::{ColumnConfig, TopicCauseMapping};
use polars::prelude::DataFrame;

use crate::cause::normalize_causes;
use crate::chronic::{prepare_chronic, select_indicators};
use crate::error::Result;
use crate::mapping::map_topics;
use crate::merge::join_and_validate;

/// Intermediate and final frames of one run.
#[derive(Debug, Clone)]
pub struct ProcessedFrames {
    pub chronic_rows: usize,
    pub mortality_rows: usize,
    pub selected: DataFrame,
    pub mapped: DataFrame,
    pub causes: DataFrame,
    pub merged: DataFrame,
}

/// Runs every stage over the two raw frames.
pub fn process_frames(
    chronic_raw: DataFrame,
    mortality_raw: DataFrame,
    mapping: &TopicCauseMapping,
    columns: &ColumnConfig,
) -> Result<ProcessedFrames> {
    let chronic_rows = chronic_raw.height();
    let mortality_rows = mortality_raw.height();

    let chronic = prepare_chronic(chronic_raw)?;
    let selected = select_indicators(&chronic)?;
    let mapped = map_topics(&selected, mapping, &columns.required_after_filter)?;
    let causes = normalize_causes(mortality_raw, mapping)?;
    let merged = join_and_validate(&mapped, &causes, &columns.required_after_join)?;

    Ok(ProcessedFrames {
        chronic_rows,
        mortality_rows,
        selected,
        mapped,
        causes,
        merged,
    })
}
