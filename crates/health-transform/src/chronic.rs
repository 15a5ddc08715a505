//! Chronic disease indicator selection.
//!
//! Keeps the age-adjusted, overall-population, mortality-related indicators
//! and reduces them to one row per (Year, State, Topic).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::Instant;

use health_ingest::coerce_columns;
use health_model::columns::{
    AGE_ADJUSTED_RATE, CHRONIC_RENAMES, MORTALITY_MARKER, OVERALL_DEMOGRAPHIC, canonical,
};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::{f64_column, filter_rows, i64_column, rename_present, str_column, take_rows};

/// Renames raw chronic headers to canonical names and types the numeric columns.
///
/// Frames that already use canonical names pass through unchanged.
pub fn prepare_chronic(raw: DataFrame) -> Result<DataFrame> {
    let df = rename_present(raw, &CHRONIC_RENAMES)?;
    Ok(coerce_columns(
        df,
        &[canonical::YEAR],
        &[canonical::CHRONIC_DISEASE_VALUE],
    )?)
}

fn mentions_mortality(question: &str) -> bool {
    question.to_lowercase().contains(MORTALITY_MARKER)
}

/// Keeps age-adjusted, overall-population rows whose question mentions mortality.
pub fn filter_indicators(df: &DataFrame) -> Result<DataFrame> {
    let value_type = str_column(df, canonical::DATA_VALUE_TYPE)?;
    let demographic = str_column(df, canonical::DEMOGRAPHIC)?;
    let question = str_column(df, canonical::QUESTION)?;

    let keep: Vec<bool> = value_type
        .into_iter()
        .zip(demographic)
        .zip(question)
        .map(|((value_type, demographic), question)| {
            value_type == Some(AGE_ADJUSTED_RATE)
                && demographic == Some(OVERALL_DEMOGRAPHIC)
                && question.is_some_and(mentions_mortality)
        })
        .collect();
    filter_rows(df, &keep)
}

fn cmp_nulls_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Reduces the frame to one row per (Year, State, Topic).
///
/// Within a group the row with the smallest Question wins; ties fall through
/// to ChronicDiseaseValue, GeoLocation, DataValueType and Demographic, all
/// ascending with nulls last. Rows with a null key are dropped. Survivors come
/// out ordered by key.
pub fn dedupe_indicators(df: &DataFrame) -> Result<DataFrame> {
    let year = i64_column(df, canonical::YEAR)?;
    let state = str_column(df, canonical::STATE)?;
    let topic = str_column(df, canonical::TOPIC)?;
    let question = str_column(df, canonical::QUESTION)?;
    let value = f64_column(df, canonical::CHRONIC_DISEASE_VALUE)?;
    let geo = str_column(df, canonical::GEO_LOCATION)?;
    let value_type = str_column(df, canonical::DATA_VALUE_TYPE)?;
    let demographic = str_column(df, canonical::DEMOGRAPHIC)?;

    let rank = |a: usize, b: usize| -> Ordering {
        let text = |x: &&str, y: &&str| x.cmp(y);
        cmp_nulls_last(question.get(a), question.get(b), text)
            .then_with(|| cmp_nulls_last(value.get(a), value.get(b), |x, y| x.total_cmp(y)))
            .then_with(|| cmp_nulls_last(geo.get(a), geo.get(b), text))
            .then_with(|| cmp_nulls_last(value_type.get(a), value_type.get(b), text))
            .then_with(|| cmp_nulls_last(demographic.get(a), demographic.get(b), text))
    };

    let mut winners: BTreeMap<(i64, &str, &str), usize> = BTreeMap::new();
    for idx in 0..df.height() {
        let (Some(y), Some(s), Some(t)) = (year.get(idx), state.get(idx), topic.get(idx)) else {
            continue;
        };
        winners
            .entry((y, s, t))
            .and_modify(|best| {
                if rank(idx, *best) == Ordering::Less {
                    *best = idx;
                }
            })
            .or_insert(idx);
    }

    let order: Vec<usize> = winners.into_values().collect();
    take_rows(df, &order)
}

/// Runs the full chronic selection: filter, then deduplicate.
pub fn select_indicators(df: &DataFrame) -> Result<DataFrame> {
    let start = Instant::now();
    let filtered = filter_indicators(df)?;
    let deduped = dedupe_indicators(&filtered)?;
    tracing::debug!(
        rows_in = df.height(),
        rows_filtered = filtered.height(),
        rows_out = deduped.height(),
        duration_ms = start.elapsed().as_millis(),
        "selected chronic indicators"
    );
    Ok(deduped)
}

#[cfg(test)]
mod tests {
    use health_model::ChronicRecord;

    use super::*;
    use crate::frame_builder::chronic_frame;

    fn questions(df: &DataFrame) -> Vec<String> {
        str_column(df, canonical::QUESTION)
            .unwrap()
            .into_iter()
            .map(|q| q.unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_mentions_mortality_ignores_case() {
        assert!(mentions_mortality("Cancer MORTALITY among adults"));
        assert!(mentions_mortality("Mortality from diabetes"));
        assert!(!mentions_mortality("Prevalence of diabetes"));
    }

    #[test]
    fn test_filter_requires_every_condition() {
        let df = chronic_frame(&[
            ChronicRecord::new(2010, "Alabama", "Cancer", "Cancer mortality", 1.0),
            ChronicRecord::new(2010, "Alabama", "Cancer", "Cancer mortality", 2.0)
                .with_data_value_type("Crude Rate"),
            ChronicRecord::new(2010, "Alabama", "Cancer", "Cancer mortality", 3.0)
                .with_demographic("Female"),
            ChronicRecord::new(2010, "Alabama", "Cancer", "Cancer incidence", 4.0),
            ChronicRecord::new(2010, "Alabama", "Cancer", "", 5.0).without_question(),
        ])
        .unwrap();

        let out = filter_indicators(&df).unwrap();

        assert_eq!(out.height(), 1);
        let value = f64_column(&out, canonical::CHRONIC_DISEASE_VALUE).unwrap();
        assert_eq!(value.get(0), Some(1.0));
    }

    #[test]
    fn test_dedupe_keeps_smallest_question() {
        let df = chronic_frame(&[
            ChronicRecord::new(2015, "Texas", "Diabetes", "Diabetes mortality B", 30.0),
            ChronicRecord::new(2015, "Texas", "Diabetes", "Diabetes mortality A", 22.1),
        ])
        .unwrap();

        let out = dedupe_indicators(&df).unwrap();

        assert_eq!(questions(&out), vec!["Diabetes mortality A"]);
    }

    #[test]
    fn test_dedupe_breaks_question_ties_by_value() {
        let df = chronic_frame(&[
            ChronicRecord::new(2015, "Texas", "Diabetes", "Same", 30.0),
            ChronicRecord::new(2015, "Texas", "Diabetes", "Same", 22.1),
        ])
        .unwrap();

        let out = dedupe_indicators(&df).unwrap();

        let value = f64_column(&out, canonical::CHRONIC_DISEASE_VALUE).unwrap();
        assert_eq!(value.get(0), Some(22.1));
    }

    #[test]
    fn test_dedupe_orders_by_key_and_drops_null_keys() {
        let mut no_state = ChronicRecord::new(2011, "X", "Cancer", "Q", 1.0);
        no_state.state = None;
        let df = chronic_frame(&[
            ChronicRecord::new(2012, "Alabama", "Cancer", "Q", 1.0),
            ChronicRecord::new(2011, "Texas", "Cancer", "Q", 1.0),
            ChronicRecord::new(2011, "Alabama", "Diabetes", "Q", 1.0),
            ChronicRecord::new(2011, "Alabama", "Cancer", "Q", 1.0),
            no_state,
        ])
        .unwrap();

        let out = dedupe_indicators(&df).unwrap();

        let years: Vec<Option<i64>> = i64_column(&out, canonical::YEAR)
            .unwrap()
            .into_iter()
            .collect();
        let states: Vec<Option<&str>> = str_column(&out, canonical::STATE)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(years, vec![Some(2011), Some(2011), Some(2011), Some(2012)]);
        assert_eq!(
            states,
            vec![Some("Alabama"), Some("Alabama"), Some("Texas"), Some("Alabama")]
        );
    }

    #[test]
    fn test_empty_input() {
        let df = chronic_frame(&[]).unwrap();
        assert_eq!(select_indicators(&df).unwrap().height(), 0);
    }
}
