//! Mortality cause normalization.

use std::time::Instant;

use health_ingest::coerce_columns;
use health_model::TopicCauseMapping;
use health_model::columns::{MORTALITY_RENAMES, canonical};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::{filter_rows, rename_present, str_column, unique_rows};

/// Renames raw mortality headers to canonical names and types the numeric columns.
pub fn prepare_causes(raw: DataFrame) -> Result<DataFrame> {
    let df = rename_present(raw, &MORTALITY_RENAMES)?;
    Ok(coerce_columns(
        df,
        &[canonical::YEAR, canonical::DEATHS],
        &[canonical::AGE_ADJUSTED_DEATH_RATE],
    )?)
}

/// Keeps causes the mapping can reach and removes exact duplicate rows.
///
/// Accepts either the raw mortality frame or one already in canonical form.
/// Row order is preserved; the first of each set of duplicates is kept.
pub fn normalize_causes(raw: DataFrame, mapping: &TopicCauseMapping) -> Result<DataFrame> {
    let start = Instant::now();
    let rows_in = raw.height();
    let df = prepare_causes(raw)?;

    let causes = mapping.causes();
    let keep: Vec<bool> = str_column(&df, canonical::CAUSE_NAME)?
        .into_iter()
        .map(|cause| cause.is_some_and(|c| causes.contains(c)))
        .collect();
    let known = filter_rows(&df, &keep)?;
    let out = unique_rows(&known)?;

    tracing::debug!(
        rows_in,
        rows_known = known.height(),
        rows_out = out.height(),
        duration_ms = start.elapsed().as_millis(),
        "normalized causes"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use health_model::CauseRecord;
    use polars::prelude::{NamedFrom, Series};

    use super::*;
    use crate::frame::i64_column;
    use crate::frame_builder::cause_frame;

    #[test]
    fn test_unknown_causes_are_dropped() {
        let df = cause_frame(&[
            CauseRecord::new(2015, "Texas", "Diabetes", 1200, 15.3),
            CauseRecord::new(2015, "Texas", "Unintentional injuries", 900, 30.0),
            CauseRecord::new(2015, "Texas", "All causes", 9000, 700.0),
        ])
        .unwrap();

        let out = normalize_causes(df, &TopicCauseMapping::standard()).unwrap();

        assert_eq!(out.height(), 1);
    }

    #[test]
    fn test_duplicates_collapse_to_first() {
        let df = cause_frame(&[
            CauseRecord::new(2015, "Texas", "Diabetes", 1200, 15.3),
            CauseRecord::new(2014, "Texas", "Diabetes", 1100, 15.0),
            CauseRecord::new(2015, "Texas", "Diabetes", 1200, 15.3),
        ])
        .unwrap();

        let out = normalize_causes(df, &TopicCauseMapping::standard()).unwrap();

        let years: Vec<Option<i64>> = i64_column(&out, canonical::YEAR)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(years, vec![Some(2015), Some(2014)]);
    }

    #[test]
    fn test_raw_frame_is_renamed_and_typed() {
        let raw = DataFrame::new(vec![
            Series::new("Year".into(), vec!["2015", "2015"]).into(),
            Series::new("State".into(), vec!["Texas", "Texas"]).into(),
            Series::new("Cause Name".into(), vec!["Heart Disease", "Cancer"]).into(),
            Series::new("Deaths".into(), vec!["45,000", "n/a"]).into(),
            Series::new("Age-adjusted Death Rate".into(), vec!["170.1", "150.2"]).into(),
        ])
        .unwrap();

        let out = normalize_causes(raw, &TopicCauseMapping::standard()).unwrap();

        let names: Vec<&str> = out.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["Year", "State", "Cause_Name", "Deaths", "Age_Adjusted_Death_Rate"]
        );
        let deaths: Vec<Option<i64>> = i64_column(&out, canonical::DEATHS)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(deaths, vec![Some(45_000), None]);
    }
}
