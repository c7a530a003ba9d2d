//! DataFrame column helpers with validation
//!
//! Provides safe, explicit patterns for pulling numeric columns out of
//! Polars DataFrames so a missing or null column fails loudly instead of
//! producing a silently wrong plot.

use crate::error::ViewerError;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Check that every required column is present
///
/// # Arguments
/// * `df` - DataFrame loaded from CSV
/// * `columns` - Required column names
/// * `context` - Context for error messages (e.g., "world.csv")
///
/// # Errors
/// Returns `ViewerError::MissingColumn` for the first absent column, listing
/// the columns that are available.
///
/// # Example
/// ```rust,ignore
/// require_columns(&df, &["x", "y", "score"], "data.csv")?;
/// ```
pub fn require_columns(df: &DataFrame, columns: &[&str], context: &str) -> Result<(), ViewerError> {
    let actual_cols: HashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !actual_cols.contains(expected) {
            let mut available: Vec<String> = actual_cols.iter().cloned().collect();
            available.sort();
            return Err(ViewerError::MissingColumn {
                context: context.to_string(),
                column: expected.to_string(),
                available,
            });
        }
    }

    Ok(())
}

/// Materialize a column as `Vec<f64>`
///
/// Integer columns are cast to Float64 first, so `i_x = 100` and
/// `i_x = 100.0` load the same way. Nulls (empty CSV fields) are rejected.
///
/// # Errors
/// Returns error if:
/// - The column is missing
/// - The column cannot be cast to Float64 (e.g., free text)
/// - Any row holds a null
pub fn f64_column(df: &DataFrame, name: &str, context: &str) -> Result<Vec<f64>> {
    let values = float_column(df, name, context)?;

    let mut out = Vec::with_capacity(values.len());
    for (row, value) in values.iter().enumerate() {
        match value {
            Some(v) => out.push(v),
            None => {
                return Err(ViewerError::NullValue {
                    context: context.to_string(),
                    column: name.to_string(),
                    row,
                }
                .into())
            }
        }
    }

    Ok(out)
}

/// Read one row of a column as `f64`, ignoring every other row
///
/// # Errors
/// Returns error if the column is missing or not numeric, the row is out of
/// range, or the cell is null.
pub fn f64_at(df: &DataFrame, name: &str, row: usize, context: &str) -> Result<f64> {
    let values = float_column(df, name, context)?;
    if row >= values.len() {
        return Err(ViewerError::EmptyTable(context.to_string()).into());
    }

    values.get(row).ok_or_else(|| {
        ViewerError::NullValue {
            context: context.to_string(),
            column: name.to_string(),
            row,
        }
        .into()
    })
}

fn float_column(df: &DataFrame, name: &str, context: &str) -> Result<Float64Chunked> {
    require_columns(df, &[name], context)?;

    let casted = df
        .column(name)
        .with_context(|| format!("{}: Missing {} column", context, name))?
        .cast(&DataType::Float64)
        .with_context(|| format!("{}: Column '{}' is not numeric", context, name))?;
    let values = casted
        .f64()
        .with_context(|| format!("{}: Column '{}' is not Float64 after cast", context, name))?;
    Ok(values.clone())
}

/// Read a single cell through the column accessor (label-style access)
///
/// Returns `None` when the row is out of range or the value is not numeric.
pub fn cell_as_f64(df: &DataFrame, name: &str, row: usize) -> Option<f64> {
    if row >= df.height() {
        return None;
    }
    df.column(name).ok()?.get(row).ok()?.extract::<f64>()
}
