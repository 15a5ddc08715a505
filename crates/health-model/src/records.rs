//! Row types for the source tables and the merged output.
//!
//! Source rows keep every field optional because the published files contain
//! blanks and unparsable cells. The merged row only keeps `geo_location`
//! optional; everything else is guaranteed by the join and validation stage.

use serde::{Deserialize, Serialize};

use crate::columns::{AGE_ADJUSTED_RATE, OVERALL_DEMOGRAPHIC};

/// One chronic disease indicator for a state-year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChronicRecord {
    pub year: Option<i64>,
    pub state: Option<String>,
    pub topic: Option<String>,
    pub question: Option<String>,
    pub chronic_disease_value: Option<f64>,
    pub data_value_type: Option<String>,
    pub demographic: Option<String>,
    pub geo_location: Option<String>,
}

impl ChronicRecord {
    /// An age-adjusted, overall-population indicator.
    pub fn new(
        year: i64,
        state: impl Into<String>,
        topic: impl Into<String>,
        question: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            year: Some(year),
            state: Some(state.into()),
            topic: Some(topic.into()),
            question: Some(question.into()),
            chronic_disease_value: Some(value),
            data_value_type: Some(AGE_ADJUSTED_RATE.to_string()),
            demographic: Some(OVERALL_DEMOGRAPHIC.to_string()),
            geo_location: None,
        }
    }

    #[must_use]
    pub fn with_data_value_type(mut self, value: impl Into<String>) -> Self {
        self.data_value_type = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_demographic(mut self, value: impl Into<String>) -> Self {
        self.demographic = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_geo_location(mut self, value: impl Into<String>) -> Self {
        self.geo_location = Some(value.into());
        self
    }

    #[must_use]
    pub fn without_question(mut self) -> Self {
        self.question = None;
        self
    }
}

/// Mortality statistics for a state-year-cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseRecord {
    pub year: Option<i64>,
    pub state: Option<String>,
    pub cause_name: Option<String>,
    pub deaths: Option<i64>,
    pub age_adjusted_death_rate: Option<f64>,
}

impl CauseRecord {
    pub fn new(
        year: i64,
        state: impl Into<String>,
        cause_name: impl Into<String>,
        deaths: i64,
        age_adjusted_death_rate: f64,
    ) -> Self {
        Self {
            year: Some(year),
            state: Some(state.into()),
            cause_name: Some(cause_name.into()),
            deaths: Some(deaths),
            age_adjusted_death_rate: Some(age_adjusted_death_rate),
        }
    }

    #[must_use]
    pub fn without_deaths(mut self) -> Self {
        self.deaths = None;
        self
    }

    #[must_use]
    pub fn without_rate(mut self) -> Self {
        self.age_adjusted_death_rate = None;
        self
    }
}

/// A row of the merged fact table, as persisted by the sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub year: i64,
    pub state: String,
    pub deaths: i64,
    pub age_adjusted_death_rate: f64,
    pub topic: String,
    pub chronic_disease_value: f64,
    pub geo_location: Option<String>,
}
