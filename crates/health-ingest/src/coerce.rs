//! Text-to-number coercion for freshly read tables.
//!
//! Source files carry numbers as text, sometimes with thousands separators,
//! sometimes as footnote markers or blanks. Anything that does not parse
//! becomes null; a bad cell never fails the run.

use polars::prelude::{
    Column, DataFrame, DataType, Float64Chunked, Int64Chunked, IntoColumn, NewChunkedArray,
};

use crate::error::{IngestError, Result};

/// Parses a decimal, ignoring surrounding whitespace and thousands separators.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|ch| *ch != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a whole number. Decimal text with no fractional part ("1200.0") is accepted.
pub fn parse_count(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|ch| *ch != ',').collect();
    if let Ok(parsed) = cleaned.parse::<i64>() {
        return Some(parsed);
    }
    let decimal = parse_decimal(&cleaned)?;
    if decimal.fract() == 0.0 && decimal.abs() < i64::MAX as f64 {
        Some(decimal as i64)
    } else {
        None
    }
}

fn source_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| IngestError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Returns `name` as an Int64 column.
pub fn int_column(df: &DataFrame, name: &str) -> Result<Column> {
    let column = source_column(df, name)?;
    if column.dtype() != &DataType::String {
        return Ok(column.cast(&DataType::Int64)?);
    }
    let parsed: Vec<Option<i64>> = column
        .str()?
        .into_iter()
        .map(|value| value.and_then(parse_count))
        .collect();
    Ok(Int64Chunked::from_iter_options(name.into(), parsed.into_iter()).into_column())
}

/// Returns `name` as a Float64 column.
pub fn float_column(df: &DataFrame, name: &str) -> Result<Column> {
    let column = source_column(df, name)?;
    if column.dtype() != &DataType::String {
        return Ok(column.cast(&DataType::Float64)?);
    }
    let parsed: Vec<Option<f64>> = column
        .str()?
        .into_iter()
        .map(|value| value.and_then(parse_decimal))
        .collect();
    Ok(Float64Chunked::from_iter_options(name.into(), parsed.into_iter()).into_column())
}

/// Replaces the named columns with typed versions, leaving the rest untouched.
pub fn coerce_columns(mut df: DataFrame, ints: &[&str], floats: &[&str]) -> Result<DataFrame> {
    for name in ints {
        let column = int_column(&df, name)?;
        df.with_column(column)?;
    }
    for name in floats {
        let column = float_column(&df, name)?;
        df.with_column(column)?;
    }
    Ok(df)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{NamedFrom, Series};

    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("15.3"), Some(15.3));
        assert_eq!(parse_decimal(" 1,234.5 "), Some(1234.5));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("~"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1000"), Some(1000));
        assert_eq!(parse_count("12,345"), Some(12345));
        assert_eq!(parse_count("1200.0"), Some(1200));
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count("n/a"), None);
    }

    #[test]
    fn test_coerce_columns_turns_bad_cells_into_nulls() {
        let df = DataFrame::new(vec![
            Series::new("Year".into(), vec![Some("2010"), Some("x"), None]).into(),
            Series::new("Rate".into(), vec![Some("15.3"), Some(""), Some("2.0")]).into(),
            Series::new("State".into(), vec!["AL", "AK", "AZ"]).into(),
        ])
        .unwrap();

        let df = coerce_columns(df, &["Year"], &["Rate"]).unwrap();

        let year = df.column("Year").unwrap().i64().unwrap();
        assert_eq!(year.get(0), Some(2010));
        assert_eq!(year.get(1), None);
        assert_eq!(year.get(2), None);
        let rate = df.column("Rate").unwrap().f64().unwrap();
        assert_eq!(rate.get(0), Some(15.3));
        assert_eq!(rate.get(1), None);
        assert_eq!(rate.get(2), Some(2.0));
        assert_eq!(df.column("State").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_numeric_columns_are_cast() {
        let df = DataFrame::new(vec![Series::new("Year".into(), vec![2010i32, 2011]).into()])
            .unwrap();
        let column = int_column(&df, "Year").unwrap();
        assert_eq!(column.dtype(), &DataType::Int64);
    }

    #[test]
    fn test_unknown_column() {
        let df = DataFrame::new(vec![Series::new("Year".into(), vec![2010i64]).into()]).unwrap();
        assert!(matches!(
            float_column(&df, "Deaths"),
            Err(IngestError::ColumnNotFound { .. })
        ));
    }
}
