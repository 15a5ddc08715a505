//! Property tests for the chronic selection and the merged output.

use health_model::columns::canonical;
use health_model::{CauseRecord, ChronicRecord, ColumnConfig, TopicCauseMapping};
use health_transform::{
    cause_frame, chronic_frame, duplicate_row_count, filter_indicators, merged_records,
    process_frames, select_indicators,
};
use polars::prelude::{DataFrame, DataType};
use proptest::prelude::*;

const STATES: [&str; 3] = ["Alabama", "Ohio", "Texas"];
const TOPICS: [&str; 3] = ["Cancer", "Diabetes", "Arthritis"];
const QUESTIONS: [&str; 4] = [
    "Mortality A",
    "mortality B",
    "Cancer MORTALITY",
    "Prevalence",
];
const VALUE_TYPES: [&str; 2] = ["Age-adjusted Rate", "Crude Rate"];
const DEMOGRAPHICS: [&str; 2] = ["Overall", "Female"];

fn chronic_record() -> impl Strategy<Value = ChronicRecord> {
    (
        2010i64..2013,
        0..STATES.len(),
        0..TOPICS.len(),
        0..QUESTIONS.len(),
        0u8..5,
        0..VALUE_TYPES.len(),
        0..DEMOGRAPHICS.len(),
    )
        .prop_map(|(year, state, topic, question, value, value_type, demographic)| {
            ChronicRecord::new(
                year,
                STATES[state],
                TOPICS[topic],
                QUESTIONS[question],
                f64::from(value),
            )
            .with_data_value_type(VALUE_TYPES[value_type])
            .with_demographic(DEMOGRAPHICS[demographic])
        })
}

fn cause_record() -> impl Strategy<Value = CauseRecord> {
    (2010i64..2013, 0..STATES.len(), 0..2usize, 0i64..3)
        .prop_map(|(year, state, cause, deaths)| {
            CauseRecord::new(
                year,
                STATES[state],
                ["Cancer", "Diabetes"][cause],
                deaths * 100,
                deaths as f64,
            )
        })
}

fn rows(df: &DataFrame) -> Vec<String> {
    let text = |name: &str| -> Vec<Option<String>> {
        let column = df.column(name).unwrap().cast(&DataType::String).unwrap();
        column
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    };
    let columns: Vec<Vec<Option<String>>> = [
        canonical::YEAR,
        canonical::STATE,
        canonical::TOPIC,
        canonical::QUESTION,
        canonical::CHRONIC_DISEASE_VALUE,
        canonical::DATA_VALUE_TYPE,
        canonical::DEMOGRAPHIC,
    ]
    .into_iter()
    .map(text)
    .collect();
    (0..df.height())
        .map(|idx| {
            let cells: Vec<&Option<String>> = columns.iter().map(|c| &c[idx]).collect();
            format!("{cells:?}")
        })
        .collect()
}

proptest! {
    #[test]
    fn filter_keeps_exactly_matching_rows(records in prop::collection::vec(chronic_record(), 0..40)) {
        let expected = records
            .iter()
            .filter(|r| {
                r.data_value_type.as_deref() == Some("Age-adjusted Rate")
                    && r.demographic.as_deref() == Some("Overall")
                    && r
                        .question
                        .as_deref()
                        .is_some_and(|q| q.to_lowercase().contains("mortality"))
            })
            .count();

        let out = filter_indicators(&chronic_frame(&records).unwrap()).unwrap();

        prop_assert_eq!(out.height(), expected);
    }

    #[test]
    fn selection_ignores_row_order(
        (records, shuffled) in prop::collection::vec(chronic_record(), 0..40)
            .prop_flat_map(|records| {
                let shuffled = Just(records.clone()).prop_shuffle();
                (Just(records), shuffled)
            })
    ) {
        let first = select_indicators(&chronic_frame(&records).unwrap()).unwrap();
        let second = select_indicators(&chronic_frame(&shuffled).unwrap()).unwrap();

        prop_assert_eq!(rows(&first), rows(&second));
    }

    #[test]
    fn merged_output_is_clean(
        chronic in prop::collection::vec(chronic_record(), 0..40),
        causes in prop::collection::vec(cause_record(), 0..20),
    ) {
        let processed = process_frames(
            chronic_frame(&chronic).unwrap(),
            cause_frame(&causes).unwrap(),
            &TopicCauseMapping::standard(),
            &ColumnConfig::default(),
        )
        .unwrap();

        prop_assert_eq!(duplicate_row_count(&processed.merged).unwrap(), 0);
        for name in [canonical::DEATHS, canonical::AGE_ADJUSTED_DEATH_RATE, canonical::TOPIC] {
            prop_assert_eq!(processed.merged.column(name).unwrap().null_count(), 0);
        }
        let merged = merged_records(&processed.merged).unwrap();
        prop_assert!(merged.iter().all(|r| r.topic != "Arthritis"));
    }
}
