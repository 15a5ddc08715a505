//! Topic to cause attachment.

use health_model::TopicCauseMapping;
use health_model::columns::canonical;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::Result;
use crate::frame::{drop_nulls_in, str_column};

/// Adds a `Cause_Name` column looked up from each row's Topic.
///
/// Unmapped topics get a null cause.
pub fn attach_causes(df: &DataFrame, mapping: &TopicCauseMapping) -> Result<DataFrame> {
    let causes: Vec<Option<&str>> = str_column(df, canonical::TOPIC)?
        .into_iter()
        .map(|topic| topic.and_then(|t| mapping.cause_for(t)))
        .collect();
    let cause_column = Series::new(canonical::CAUSE_NAME.into(), causes).into_column();
    let mut out = df.clone();
    out.with_column(cause_column)?;
    Ok(out)
}

/// Attaches causes, then drops rows with a null in any `required` column.
pub fn map_topics<S: AsRef<str>>(
    df: &DataFrame,
    mapping: &TopicCauseMapping,
    required: &[S],
) -> Result<DataFrame> {
    let mapped = attach_causes(df, mapping)?;
    let out = drop_nulls_in(&mapped, required)?;
    tracing::debug!(
        rows_in = df.height(),
        rows_out = out.height(),
        "mapped topics to causes"
    );
    Ok(out)
}
