//! Join of chronic indicators with mortality causes, and validation of the result.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Instant;

use health_model::columns::canonical;
use health_model::merged_column_names;
use polars::prelude::DataFrame;

use crate::error::{Result, TransformError};
use crate::frame::{
    drop_nulls_in, duplicate_row_count, f64_column, i64_column, str_column, take_rows, unique_rows,
};

/// Columns of the merged output that may never hold a null.
pub const NON_NULL_MERGED: [&str; 6] = [
    canonical::YEAR,
    canonical::STATE,
    canonical::DEATHS,
    canonical::AGE_ADJUSTED_DEATH_RATE,
    canonical::TOPIC,
    canonical::CHRONIC_DISEASE_VALUE,
];

type JoinKey<'a> = (i64, &'a str, &'a str);

fn join_keys(df: &DataFrame) -> Result<Vec<Option<JoinKey<'_>>>> {
    let year = i64_column(df, canonical::YEAR)?;
    let state = str_column(df, canonical::STATE)?;
    let cause = str_column(df, canonical::CAUSE_NAME)?;
    Ok(year
        .into_iter()
        .zip(state)
        .zip(cause)
        .map(|((y, s), c)| Some((y?, s?, c?)))
        .collect())
}

/// Inner equality join on (Year, State, Cause_Name).
///
/// Every chronic column is kept, followed by the cause table's Deaths and
/// Age_Adjusted_Death_Rate. Rows with a null key never match.
pub fn join_on_cause(chronic: &DataFrame, causes: &DataFrame) -> Result<DataFrame> {
    let mut index: HashMap<JoinKey<'_>, Vec<usize>> = HashMap::new();
    for (idx, key) in join_keys(causes)?.into_iter().enumerate() {
        if let Some(key) = key {
            index.entry(key).or_default().push(idx);
        }
    }

    let mut left = Vec::new();
    let mut right = Vec::new();
    for (idx, key) in join_keys(chronic)?.into_iter().enumerate() {
        let Some(matches) = key.and_then(|key| index.get(&key)) else {
            continue;
        };
        for matched in matches {
            left.push(idx);
            right.push(*matched);
        }
    }

    let joined = take_rows(chronic, &left)?;
    let measures = take_rows(
        &causes.select([canonical::DEATHS, canonical::AGE_ADJUSTED_DEATH_RATE])?,
        &right,
    )?;
    Ok(joined.hstack(measures.get_columns())?)
}

fn merged_order(df: &DataFrame) -> Result<Vec<usize>> {
    let year = i64_column(df, canonical::YEAR)?;
    let state = str_column(df, canonical::STATE)?;
    let topic = str_column(df, canonical::TOPIC)?;
    let deaths = i64_column(df, canonical::DEATHS)?;
    let rate = f64_column(df, canonical::AGE_ADJUSTED_DEATH_RATE)?;
    let value = f64_column(df, canonical::CHRONIC_DISEASE_VALUE)?;
    let geo = str_column(df, canonical::GEO_LOCATION)?;

    let float = |a: Option<f64>, b: Option<f64>| match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_none().cmp(&b.is_none()),
    };

    let mut order: Vec<usize> = (0..df.height()).collect();
    order.sort_by(|&a, &b| {
        year.get(a)
            .cmp(&year.get(b))
            .then_with(|| state.get(a).cmp(&state.get(b)))
            .then_with(|| topic.get(a).cmp(&topic.get(b)))
            .then_with(|| deaths.get(a).cmp(&deaths.get(b)))
            .then_with(|| float(rate.get(a), rate.get(b)))
            .then_with(|| float(value.get(a), value.get(b)))
            .then_with(|| match (geo.get(a), geo.get(b)) {
                (Some(x), Some(y)) => x.cmp(y),
                (x, y) => x.is_none().cmp(&y.is_none()),
            })
    });
    Ok(order)
}

/// Orders merged rows by Year, State, Topic, Deaths, Age_Adjusted_Death_Rate,
/// ChronicDiseaseValue and finally GeoLocation.
pub fn sort_merged(df: &DataFrame) -> Result<DataFrame> {
    let order = merged_order(df)?;
    take_rows(df, &order)
}

/// Confirms the merged frame has no nulls in guaranteed columns and no duplicate rows.
pub fn check_merged(df: &DataFrame) -> Result<()> {
    for name in NON_NULL_MERGED {
        let nulls = df
            .column(name)
            .map_err(|_| TransformError::MissingColumn {
                column: name.to_string(),
            })?
            .null_count();
        if nulls > 0 {
            return Err(TransformError::InvariantViolation {
                message: format!("{nulls} null value(s) in {name}"),
            });
        }
    }
    let duplicates = duplicate_row_count(df)?;
    if duplicates > 0 {
        return Err(TransformError::InvariantViolation {
            message: format!("{duplicates} duplicate row(s)"),
        });
    }
    Ok(())
}

/// Joins the mapped chronic frame with the normalized cause frame and
/// reduces the result to the merged output.
///
/// Rows with a null in `required` or in any of [`NON_NULL_MERGED`] are
/// dropped. The output has the merged column order, no duplicate rows, and a
/// deterministic row order. An empty input or a join without matches yields
/// an empty frame.
pub fn join_and_validate<S: AsRef<str>>(
    chronic: &DataFrame,
    causes: &DataFrame,
    required: &[S],
) -> Result<DataFrame> {
    let start = Instant::now();
    let joined = join_on_cause(chronic, causes)?;
    let mut non_null: Vec<&str> = required.iter().map(AsRef::as_ref).collect();
    for name in NON_NULL_MERGED {
        if !non_null.contains(&name) {
            non_null.push(name);
        }
    }
    let complete = drop_nulls_in(&joined, &non_null)?;
    let projected = complete.select(merged_column_names())?;
    let unique = unique_rows(&projected)?;
    let merged = sort_merged(&unique)?;
    check_merged(&merged)?;

    tracing::debug!(
        rows_chronic = chronic.height(),
        rows_causes = causes.height(),
        rows_joined = joined.height(),
        rows_complete = complete.height(),
        rows_out = merged.height(),
        duration_ms = start.elapsed().as_millis(),
        "joined and validated"
    );
    Ok(merged)
}
