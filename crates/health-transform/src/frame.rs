//! Row-level helpers shared by the stages.
//!
//! The stages decide row by row which records survive, then materialize the
//! decision with a boolean mask or an index take.

use std::collections::BTreeSet;

use polars::prelude::{
    BooleanChunked, Column, DataFrame, DataType, Float64Chunked, IdxCa, IdxSize, Int64Chunked,
    NewChunkedArray, StringChunked,
};

use crate::error::{Result, TransformError};

pub(crate) fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::MissingColumn {
        column: name.to_string(),
    })
}

fn type_error(column: &Column, name: &str, expected: &'static str) -> TransformError {
    TransformError::ColumnType {
        column: name.to_string(),
        found: column.dtype().to_string(),
        expected,
    }
}

pub(crate) fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    let col = column(df, name)?;
    col.str().map_err(|_| type_error(col, name, "str"))
}

pub(crate) fn i64_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Int64Chunked> {
    let col = column(df, name)?;
    col.i64().map_err(|_| type_error(col, name, "i64"))
}

pub(crate) fn f64_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Float64Chunked> {
    let col = column(df, name)?;
    col.f64().map_err(|_| type_error(col, name, "f64"))
}

/// Renames every `(from, to)` pair whose source column is present.
pub fn rename_present(mut df: DataFrame, renames: &[(&str, &str)]) -> Result<DataFrame> {
    for (from, to) in renames {
        if from == to {
            continue;
        }
        if df.column(from).is_ok() {
            df.rename(from, (*to).into())?;
        }
    }
    Ok(df)
}

/// Keeps rows whose `keep` entry is true.
pub(crate) fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Gathers rows by position, in the given order.
pub(crate) fn take_rows(df: &DataFrame, indices: &[usize]) -> Result<DataFrame> {
    let indices: Vec<IdxSize> = indices.iter().map(|idx| *idx as IdxSize).collect();
    let idx = IdxCa::from_vec("idx".into(), indices);
    Ok(df.take(&idx)?)
}

/// Drops rows holding a null in any of `columns`.
pub fn drop_nulls_in<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for name in columns {
        let validity = column(df, name.as_ref())?.is_not_null();
        for (flag, valid) in keep.iter_mut().zip(&validity) {
            *flag &= valid.unwrap_or(false);
        }
    }
    filter_rows(df, &keep)
}

/// Bit pattern of a float with `-0.0` folded into `0.0`.
fn float_key(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

/// Renders each cell of a column as a comparable key; `None` is a null cell.
fn cell_keys(column: &Column) -> Result<Vec<Option<String>>> {
    let keys = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect(),
        DataType::Int64 => column
            .i64()?
            .into_iter()
            .map(|value| value.map(|v| v.to_string()))
            .collect(),
        DataType::Float64 => column
            .f64()?
            .into_iter()
            .map(|value| value.map(|v| format!("{:016x}", float_key(v))))
            .collect(),
        _ => {
            let as_text = column.cast(&DataType::String)?;
            as_text
                .str()?
                .into_iter()
                .map(|value| value.map(str::to_string))
                .collect()
        }
    };
    Ok(keys)
}

/// One composite key per row covering every column.
fn row_keys(df: &DataFrame) -> Result<Vec<String>> {
    let mut rows = vec![String::new(); df.height()];
    for col in df.get_columns() {
        for (row, cell) in rows.iter_mut().zip(cell_keys(col)?) {
            match cell {
                Some(value) => {
                    row.push('\u{1}');
                    row.push_str(&value);
                }
                None => row.push('\u{0}'),
            }
            row.push('\u{1f}');
        }
    }
    Ok(rows)
}

/// Removes exact full-row duplicates, keeping the first occurrence in place.
pub fn unique_rows(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    let mut seen = BTreeSet::new();
    let keep: Vec<bool> = row_keys(df)?
        .into_iter()
        .map(|key| seen.insert(key))
        .collect();
    filter_rows(df, &keep)
}

/// Number of rows that repeat an earlier row exactly.
pub fn duplicate_row_count(df: &DataFrame) -> Result<usize> {
    let mut seen = BTreeSet::new();
    Ok(row_keys(df)?
        .into_iter()
        .filter(|key| !seen.insert(key.clone()))
        .count())
}
