//! Sink schema contract.

use health_model::{MERGED_SCHEMA, SqlType, create_table_sql, drop_table_sql, merged_column_names};

#[test]
fn create_table_statement_matches_contract() {
    let sql = create_table_sql("Merged_Data").unwrap();
    insta::assert_snapshot!(sql, @r"
    CREATE TABLE Merged_Data (
        Year INTEGER,
        State TEXT,
        Deaths INTEGER,
        Age_Adjusted_Death_Rate REAL,
        Topic TEXT,
        ChronicDiseaseValue REAL,
        GeoLocation TEXT
    );
    ");
}

#[test]
fn drop_statement_is_conditional() {
    assert_eq!(
        drop_table_sql("Merged_Data").unwrap(),
        "DROP TABLE IF EXISTS Merged_Data;"
    );
}

#[test]
fn ddl_refuses_unsafe_names() {
    assert!(create_table_sql("Merged_Data; --").is_err());
    assert!(drop_table_sql("a b").is_err());
}

#[test]
fn column_order_and_types() {
    assert_eq!(
        merged_column_names(),
        vec![
            "Year",
            "State",
            "Deaths",
            "Age_Adjusted_Death_Rate",
            "Topic",
            "ChronicDiseaseValue",
            "GeoLocation",
        ]
    );
    let types: Vec<SqlType> = MERGED_SCHEMA.iter().map(|c| c.sql_type).collect();
    assert_eq!(
        types,
        vec![
            SqlType::Integer,
            SqlType::Text,
            SqlType::Integer,
            SqlType::Real,
            SqlType::Text,
            SqlType::Real,
            SqlType::Text,
        ]
    );
}
