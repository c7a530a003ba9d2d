//! Pivot of the long-form score table into a 2-D grid
//!
//! Columns are the sorted unique `x` values, rows the sorted unique `y`
//! values. Pairs absent from the table leave a `None` cell, which renders as
//! a blank square. Repeated pairs are resolved by an explicit
//! [`DuplicatePolicy`]; the default rejects them.

use crate::data::{Bounds, ScoreTable};
use crate::error::ViewerError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// What to do when the same `(x, y)` pair appears more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with `ViewerError::DuplicateCell`
    #[default]
    Reject,
    First,
    Last,
    Mean,
    Min,
    Max,
}

/// Wide score matrix, row-major with rows indexed by `ys`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    cells: Vec<Option<f64>>,
}

impl Grid {
    /// Number of columns (unique x values)
    pub fn width(&self) -> usize {
        self.xs.len()
    }

    /// Number of rows (unique y values)
    pub fn height(&self) -> usize {
        self.ys.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        self.cells[row * self.width() + col]
    }

    /// Look a cell up by its real-world coordinates
    pub fn value_at(&self, x: f64, y: f64) -> Option<f64> {
        let col = position(&self.xs, x)?;
        let row = position(&self.ys, y)?;
        self.get(row, col)
    }

    pub fn missing_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Iterate `(row, col, score)` over present cells
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let width = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|v| (i / width, i % width, v)))
    }
}

/// Pivot `table` into a grid
///
/// # Errors
/// - `InvalidCoordinate` when an `x` or `y` value is NaN or infinite
/// - `DuplicateCell` under `DuplicatePolicy::Reject` for a repeated pair
pub fn pivot(table: &ScoreTable, policy: DuplicatePolicy) -> Result<Grid, ViewerError> {
    check_finite(&table.x, "x")?;
    check_finite(&table.y, "y")?;

    let xs = unique_sorted(&table.x);
    let ys = unique_sorted(&table.y);
    let x_index = index_of(&xs);
    let y_index = index_of(&ys);

    let width = xs.len();
    let mut acc: Vec<Option<f64>> = vec![None; width * ys.len()];
    let mut counts: Vec<u32> = vec![0; acc.len()];

    for (x, y, score) in table.rows() {
        let col = x_index[&key(x)];
        let row = y_index[&key(y)];
        let i = row * width + col;

        acc[i] = Some(match acc[i] {
            None => score,
            Some(prev) => match policy {
                DuplicatePolicy::Reject => {
                    return Err(ViewerError::DuplicateCell {
                        x,
                        y,
                        first: prev,
                        second: score,
                    })
                }
                DuplicatePolicy::First => prev,
                DuplicatePolicy::Last => score,
                DuplicatePolicy::Mean => prev + score,
                DuplicatePolicy::Min => prev.min(score),
                DuplicatePolicy::Max => prev.max(score),
            },
        });
        counts[i] += 1;
    }

    if policy == DuplicatePolicy::Mean {
        for (cell, &n) in acc.iter_mut().zip(&counts) {
            if let Some(sum) = cell {
                *sum /= n as f64;
            }
        }
    }

    Ok(Grid {
        xs,
        ys,
        cells: acc,
    })
}

/// Shape comparison between a pivoted grid and its bounds descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatticeReport {
    /// `(columns, rows)` actually produced by the pivot
    pub actual: (usize, usize),
    /// `(columns, rows)` implied by the observed extent and the step sizes
    pub implied: (usize, usize),
    /// `(i_x, i_y)` from the bounds file
    pub reference: (usize, usize),
    pub missing: usize,
}

impl LatticeReport {
    pub fn new(grid: &Grid, bounds: &Bounds) -> Self {
        Self {
            actual: (grid.width(), grid.height()),
            implied: (
                implied_samples(&grid.xs, bounds.x_step),
                implied_samples(&grid.ys, bounds.y_step),
            ),
            reference: (bounds.i_x, bounds.i_y),
            missing: grid.missing_cells(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.missing == 0 && self.actual == self.implied && self.actual == self.reference
    }
}

/// Number of samples of a regular lattice spanning `values` with `step`
fn implied_samples(values: &[f64], step: f64) -> usize {
    match (values.first(), values.last()) {
        // A vanishing step saturates the cast
        (Some(lo), Some(hi)) if step > 0.0 => {
            (((hi - lo) / step).round() as usize).saturating_add(1)
        }
        _ => 0,
    }
}

fn check_finite(values: &[f64], column: &str) -> Result<(), ViewerError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(ViewerError::InvalidCoordinate {
            context: "score table".to_string(),
            column: column.to_string(),
            row,
        }),
        None => Ok(()),
    }
}

// -0.0 and 0.0 are the same lattice coordinate
fn key(v: f64) -> u64 {
    (v + 0.0).to_bits()
}

fn unique_sorted(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().map(|v| v + 0.0).collect();
    out.sort_by(|a, b| a.total_cmp(b));
    out.dedup();
    out
}

fn index_of(values: &[f64]) -> FxHashMap<u64, usize> {
    values.iter().enumerate().map(|(i, &v)| (key(v), i)).collect()
}

fn position(values: &[f64], v: f64) -> Option<usize> {
    values.binary_search_by(|p| p.total_cmp(&(v + 0.0))).ok()
}
