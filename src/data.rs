//! Data Loading
//!
//! Loads the three CSV inputs dumped by the pass optimiser using Polars:
//! - `world.csv`: ally/enemy positions, one ally and one enemy per row
//! - `bounds.csv`: sampling steps and cell counts, first row only
//! - `data.csv`: long-form `(x, y, score)` samples
//!
//! Every loader validates its columns up front and reports the file path in
//! the error chain.

use crate::error::ViewerError;
use crate::utils::column_helpers::{f64_at, f64_column, require_columns};
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

pub const WORLD_COLUMNS: [&str; 4] = ["ally_x", "ally_y", "enemy_x", "enemy_y"];
pub const BOUNDS_COLUMNS: [&str; 4] = ["x_step", "y_step", "i_x", "i_y"];
pub const SCORE_COLUMNS: [&str; 3] = ["x", "y", "score"];

/// Read a CSV file with a header row into a DataFrame
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {}", path.display()))
}

/// A position on the field, in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Robot positions at the time the score grid was computed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSetup {
    pub allies: Vec<Point>,
    pub enemies: Vec<Point>,
}

impl WorldSetup {
    pub fn load(path: &Path) -> Result<Self> {
        let df = read_csv(path)?;
        Self::from_frame(&df, &path.display().to_string())
    }

    /// Rows are read positionally; ally and enemy of a row are unrelated.
    pub fn from_frame(df: &DataFrame, context: &str) -> Result<Self> {
        require_columns(df, &WORLD_COLUMNS, context)?;

        let ally_x = f64_column(df, "ally_x", context)?;
        let ally_y = f64_column(df, "ally_y", context)?;
        let enemy_x = f64_column(df, "enemy_x", context)?;
        let enemy_y = f64_column(df, "enemy_y", context)?;

        Ok(Self {
            allies: zip_points(&ally_x, &ally_y),
            enemies: zip_points(&enemy_x, &enemy_y),
        })
    }
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<Point> {
    xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect()
}

/// Sampling descriptor of the score grid
///
/// `x_step`/`y_step` are the distances between samples; `i_x`/`i_y` are the
/// number of samples along each axis and serve as tick-reference bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x_step: f64,
    pub y_step: f64,
    pub i_x: usize,
    pub i_y: usize,
}

impl Bounds {
    pub fn load(path: &Path) -> Result<Self> {
        let df = read_csv(path)?;
        Self::from_frame(&df, &path.display().to_string())
    }

    /// Take the first data row; any further rows are ignored with a warning
    pub fn from_frame(df: &DataFrame, context: &str) -> Result<Self> {
        require_columns(df, &BOUNDS_COLUMNS, context)?;

        if df.height() == 0 {
            return Err(ViewerError::EmptyTable(context.to_string()).into());
        }
        if df.height() > 1 {
            tracing::warn!(
                file = context,
                rows = df.height(),
                "bounds descriptor has more than one row, using the first"
            );
        }

        let first = |name: &str| f64_at(df, name, 0, context);

        let x_step = first("x_step")?;
        let y_step = first("y_step")?;
        let i_x = cell_count(first("i_x")?, "i_x")?;
        let i_y = cell_count(first("i_y")?, "i_y")?;

        for (name, step) in [("x_step", x_step), ("y_step", y_step)] {
            if !step.is_finite() || step <= 0.0 {
                return Err(ViewerError::InvalidBounds(format!(
                    "{} must be a positive number, got {}",
                    name, step
                ))
                .into());
            }
        }

        Ok(Self {
            x_step,
            y_step,
            i_x,
            i_y,
        })
    }
}

/// Truncate towards zero, as the producer writes integer counts
fn cell_count(value: f64, name: &str) -> Result<usize, ViewerError> {
    if !value.is_finite() || value < 1.0 {
        return Err(ViewerError::InvalidBounds(format!(
            "{} must be a positive cell count, got {}",
            name, value
        )));
    }
    Ok(value.trunc() as usize)
}

/// Long-form score samples, column oriented
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub score: Vec<f64>,
}

impl ScoreTable {
    pub fn load(path: &Path) -> Result<Self> {
        let df = read_csv(path)?;
        Self::from_frame(&df, &path.display().to_string())
    }

    pub fn from_frame(df: &DataFrame, context: &str) -> Result<Self> {
        require_columns(df, &SCORE_COLUMNS, context)?;

        Ok(Self {
            x: f64_column(df, "x", context)?,
            y: f64_column(df, "y", context)?,
            score: f64_column(df, "score", context)?,
        })
    }

    /// Build from rows, mostly for tests and fixtures
    pub fn from_rows(rows: &[(f64, f64, f64)]) -> Self {
        Self {
            x: rows.iter().map(|r| r.0).collect(),
            y: rows.iter().map(|r| r.1).collect(),
            score: rows.iter().map(|r| r.2).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.score.len()
    }

    pub fn is_empty(&self) -> bool {
        self.score.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.score)
            .map(|((&x, &y), &s)| (x, y, s))
    }
}
