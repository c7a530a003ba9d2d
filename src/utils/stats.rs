//! Score statistics and axis helpers
//!
//! Summary values reported for a score table, plus the small numeric
//! helpers used to lay out rescaled tick labels.

use crate::data::ScoreTable;
use crate::error::ViewerError;
use serde::Serialize;

/// Summary of a score table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreStats {
    pub rows: usize,
    pub score_min: f64,
    pub score_max: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ScoreStats {
    /// Compute statistics over every row of the table
    ///
    /// # Errors
    /// `ViewerError::EmptyTable` when the table has no rows.
    pub fn from_table(table: &ScoreTable) -> Result<Self, ViewerError> {
        if table.is_empty() {
            return Err(ViewerError::EmptyTable("score table".to_string()));
        }

        let (score_min, score_max) = min_max(&table.score);
        let (x_min, x_max) = min_max(&table.x);
        let (y_min, y_max) = min_max(&table.y);

        Ok(Self {
            rows: table.len(),
            score_min,
            score_max,
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }
}

/// Minimum and maximum of a slice, ignoring NaN
///
/// Returns `(inf, -inf)` for an empty or all-NaN slice.
pub fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// `n` evenly spaced values from `start` to `end`, both inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stats_match_true_extremes() {
        let table = ScoreTable {
            x: vec![-1.0, 0.0, 1.0, 2.0],
            y: vec![3.0, -3.0, 0.5, 0.0],
            score: vec![0.25, -2.0, 1.75, 0.0],
        };

        let stats = ScoreStats::from_table(&table).unwrap();
        assert_eq!(stats.rows, 4);
        assert_eq!(stats.score_min, -2.0);
        assert_eq!(stats.score_max, 1.75);
        assert_eq!((stats.x_min, stats.x_max), (-1.0, 2.0));
        assert_eq!((stats.y_min, stats.y_max), (-3.0, 3.0));
    }

    #[test]
    fn test_stats_empty_table() {
        let table = ScoreTable::default();
        assert_eq!(
            ScoreStats::from_table(&table),
            Err(ViewerError::EmptyTable("score table".to_string()))
        );
    }

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(-4.5, 4.4, 10);
        assert_eq!(v.len(), 10);
        assert_eq!(v[0], -4.5);
        assert_eq!(v[9], 4.4);
        assert_relative_eq!(v[1] - v[0], 8.9 / 9.0, epsilon = 1e-12);

        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.005001, 2), -0.01);
        assert_eq!(round_to(3.0, 2), 3.0);
    }
}
