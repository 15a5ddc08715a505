//! Column vocabulary for the two source tables and the merged output.
//!
//! Raw names are the headers found in the published CSV files. Canonical
//! names are what every stage after the reader works with.

/// Canonical column names shared by the pipeline stages.
pub mod canonical {
    pub const YEAR: &str = "Year";
    pub const STATE: &str = "State";
    pub const TOPIC: &str = "Topic";
    pub const QUESTION: &str = "Question";
    pub const CHRONIC_DISEASE_VALUE: &str = "ChronicDiseaseValue";
    pub const DATA_VALUE_TYPE: &str = "DataValueType";
    pub const DEMOGRAPHIC: &str = "Demographic";
    pub const GEO_LOCATION: &str = "GeoLocation";
    pub const CAUSE_NAME: &str = "Cause_Name";
    pub const DEATHS: &str = "Deaths";
    pub const AGE_ADJUSTED_DEATH_RATE: &str = "Age_Adjusted_Death_Rate";
}

/// Headers of the chronic disease indicators download.
pub mod chronic_raw {
    pub const YEAR_START: &str = "YearStart";
    pub const LOCATION_DESC: &str = "LocationDesc";
    pub const TOPIC: &str = "Topic";
    pub const QUESTION: &str = "Question";
    pub const DATA_VALUE: &str = "DataValue";
    pub const DATA_VALUE_TYPE: &str = "DataValueType";
    pub const STRATIFICATION1: &str = "Stratification1";
    pub const GEO_LOCATION: &str = "GeoLocation";
}

/// Headers of the NCHS leading causes of death download.
pub mod mortality_raw {
    pub const YEAR: &str = "Year";
    pub const STATE: &str = "State";
    pub const CAUSE_NAME: &str = "Cause Name";
    pub const DEATHS: &str = "Deaths";
    pub const AGE_ADJUSTED_DEATH_RATE: &str = "Age-adjusted Death Rate";
}

/// Raw chronic column -> canonical column.
pub const CHRONIC_RENAMES: [(&str, &str); 8] = [
    (chronic_raw::YEAR_START, canonical::YEAR),
    (chronic_raw::LOCATION_DESC, canonical::STATE),
    (chronic_raw::TOPIC, canonical::TOPIC),
    (chronic_raw::QUESTION, canonical::QUESTION),
    (chronic_raw::DATA_VALUE, canonical::CHRONIC_DISEASE_VALUE),
    (chronic_raw::DATA_VALUE_TYPE, canonical::DATA_VALUE_TYPE),
    (chronic_raw::STRATIFICATION1, canonical::DEMOGRAPHIC),
    (chronic_raw::GEO_LOCATION, canonical::GEO_LOCATION),
];

/// Raw mortality column -> canonical column.
pub const MORTALITY_RENAMES: [(&str, &str); 5] = [
    (mortality_raw::YEAR, canonical::YEAR),
    (mortality_raw::STATE, canonical::STATE),
    (mortality_raw::CAUSE_NAME, canonical::CAUSE_NAME),
    (mortality_raw::DEATHS, canonical::DEATHS),
    (
        mortality_raw::AGE_ADJUSTED_DEATH_RATE,
        canonical::AGE_ADJUSTED_DEATH_RATE,
    ),
];

/// Canonical chronic columns, in frame order.
pub const CHRONIC_COLUMNS: [&str; 8] = [
    canonical::YEAR,
    canonical::STATE,
    canonical::TOPIC,
    canonical::QUESTION,
    canonical::CHRONIC_DISEASE_VALUE,
    canonical::DATA_VALUE_TYPE,
    canonical::DEMOGRAPHIC,
    canonical::GEO_LOCATION,
];

/// Canonical cause columns, in frame order.
pub const CAUSE_COLUMNS: [&str; 5] = [
    canonical::YEAR,
    canonical::STATE,
    canonical::CAUSE_NAME,
    canonical::DEATHS,
    canonical::AGE_ADJUSTED_DEATH_RATE,
];

/// Composite join key between the chronic and cause tables.
pub const JOIN_KEY: [&str; 3] = [canonical::YEAR, canonical::STATE, canonical::CAUSE_NAME];

/// Grouping key used to deduplicate chronic rows.
pub const CHRONIC_GROUP_KEY: [&str; 3] = [canonical::YEAR, canonical::STATE, canonical::TOPIC];

/// Columns that only exist to filter and join; never reported.
pub const SCAFFOLDING_COLUMNS: [&str; 4] = [
    canonical::QUESTION,
    canonical::CAUSE_NAME,
    canonical::DEMOGRAPHIC,
    canonical::DATA_VALUE_TYPE,
];

/// Exact `DataValueType` value kept by the chronic filter.
pub const AGE_ADJUSTED_RATE: &str = "Age-adjusted Rate";

/// Exact `Demographic` value kept by the chronic filter.
pub const OVERALL_DEMOGRAPHIC: &str = "Overall";

/// Case-insensitive substring a `Question` must contain.
pub const MORTALITY_MARKER: &str = "mortality";
