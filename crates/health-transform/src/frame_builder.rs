//! Conversions between typed records and frames.
//!
//! Frames built here use canonical column names and final types, so they can
//! be fed to any stage directly.

use health_model::columns::canonical;
use health_model::{CauseRecord, ChronicRecord, MergedRecord};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::error::{Result, TransformError};
use crate::frame::{f64_column, i64_column, str_column};

fn text<'a, T: 'a>(
    records: &'a [T],
    field: impl Fn(&'a T) -> Option<&'a String>,
) -> Vec<Option<&'a str>> {
    records.iter().map(|r| field(r).map(String::as_str)).collect()
}

/// Builds a chronic frame with the canonical column set.
pub fn chronic_frame(records: &[ChronicRecord]) -> Result<DataFrame> {
    let columns: Vec<Column> = vec![
        Series::new(
            canonical::YEAR.into(),
            records.iter().map(|r| r.year).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(canonical::STATE.into(), text(records, |r| r.state.as_ref())).into(),
        Series::new(canonical::TOPIC.into(), text(records, |r| r.topic.as_ref())).into(),
        Series::new(canonical::QUESTION.into(), text(records, |r| r.question.as_ref())).into(),
        Series::new(
            canonical::CHRONIC_DISEASE_VALUE.into(),
            records
                .iter()
                .map(|r| r.chronic_disease_value)
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            canonical::DATA_VALUE_TYPE.into(),
            text(records, |r| r.data_value_type.as_ref()),
        )
        .into(),
        Series::new(
            canonical::DEMOGRAPHIC.into(),
            text(records, |r| r.demographic.as_ref()),
        )
        .into(),
        Series::new(
            canonical::GEO_LOCATION.into(),
            text(records, |r| r.geo_location.as_ref()),
        )
        .into(),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Builds a cause frame with the canonical column set.
pub fn cause_frame(records: &[CauseRecord]) -> Result<DataFrame> {
    let columns: Vec<Column> = vec![
        Series::new(
            canonical::YEAR.into(),
            records.iter().map(|r| r.year).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(canonical::STATE.into(), text(records, |r| r.state.as_ref())).into(),
        Series::new(
            canonical::CAUSE_NAME.into(),
            text(records, |r| r.cause_name.as_ref()),
        )
        .into(),
        Series::new(
            canonical::DEATHS.into(),
            records.iter().map(|r| r.deaths).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            canonical::AGE_ADJUSTED_DEATH_RATE.into(),
            records
                .iter()
                .map(|r| r.age_adjusted_death_rate)
                .collect::<Vec<_>>(),
        )
        .into(),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Builds a merged frame in sink column order.
pub fn merged_frame(records: &[MergedRecord]) -> Result<DataFrame> {
    let columns: Vec<Column> = vec![
        Series::new(
            canonical::YEAR.into(),
            records.iter().map(|r| r.year).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            canonical::STATE.into(),
            records.iter().map(|r| r.state.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            canonical::DEATHS.into(),
            records.iter().map(|r| r.deaths).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            canonical::AGE_ADJUSTED_DEATH_RATE.into(),
            records
                .iter()
                .map(|r| r.age_adjusted_death_rate)
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            canonical::TOPIC.into(),
            records.iter().map(|r| r.topic.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            canonical::CHRONIC_DISEASE_VALUE.into(),
            records
                .iter()
                .map(|r| r.chronic_disease_value)
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            canonical::GEO_LOCATION.into(),
            text(records, |r| r.geo_location.as_ref()),
        )
        .into(),
    ];
    Ok(DataFrame::new(columns)?)
}

fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| TransformError::InvariantViolation {
        message: format!("null {column} in row {row}"),
    })
}

/// Reads a merged frame back into records.
///
/// Fails if any non-nullable column holds a null.
pub fn merged_records(df: &DataFrame) -> Result<Vec<MergedRecord>> {
    let year = i64_column(df, canonical::YEAR)?;
    let state = str_column(df, canonical::STATE)?;
    let deaths = i64_column(df, canonical::DEATHS)?;
    let rate = f64_column(df, canonical::AGE_ADJUSTED_DEATH_RATE)?;
    let topic = str_column(df, canonical::TOPIC)?;
    let value = f64_column(df, canonical::CHRONIC_DISEASE_VALUE)?;
    let geo = str_column(df, canonical::GEO_LOCATION)?;

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        records.push(MergedRecord {
            year: required(year.get(idx), canonical::YEAR, idx)?,
            state: required(state.get(idx), canonical::STATE, idx)?.to_string(),
            deaths: required(deaths.get(idx), canonical::DEATHS, idx)?,
            age_adjusted_death_rate: required(
                rate.get(idx),
                canonical::AGE_ADJUSTED_DEATH_RATE,
                idx,
            )?,
            topic: required(topic.get(idx), canonical::TOPIC, idx)?.to_string(),
            chronic_disease_value: required(value.get(idx), canonical::CHRONIC_DISEASE_VALUE, idx)?,
            geo_location: geo.get(idx).map(str::to_string),
        });
    }
    Ok(records)
}
