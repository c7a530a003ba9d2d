//! CSV writers for the three input formats
//!
//! The producer side of `world.csv`, `bounds.csv` and `data.csv`, with the
//! same headers the loaders expect. Used to build fixtures and demo inputs.

use crate::data::{Bounds, Point, ScoreTable, WorldSetup};
use crate::error::ViewerError;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn write_frame(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV: {}", path.display()))
}

/// One row per ally/enemy pair; both lists must have the same length
pub fn write_world(path: &Path, world: &WorldSetup) -> Result<()> {
    if world.allies.len() != world.enemies.len() {
        return Err(ViewerError::LengthMismatch {
            context: "world allies/enemies".to_string(),
            left: world.allies.len(),
            right: world.enemies.len(),
        }
        .into());
    }

    let (ally_x, ally_y) = coordinates(&world.allies);
    let (enemy_x, enemy_y) = coordinates(&world.enemies);

    let mut df = df![
        "ally_x" => ally_x,
        "ally_y" => ally_y,
        "enemy_x" => enemy_x,
        "enemy_y" => enemy_y,
    ]?;
    write_frame(path, &mut df)
}

fn coordinates(points: &[Point]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|p| (p.x, p.y)).unzip()
}

pub fn write_bounds(path: &Path, bounds: &Bounds) -> Result<()> {
    let mut df = df![
        "x_step" => &[bounds.x_step],
        "y_step" => &[bounds.y_step],
        "i_x" => &[bounds.i_x as i64],
        "i_y" => &[bounds.i_y as i64],
    ]?;
    write_frame(path, &mut df)
}

pub fn write_scores(path: &Path, table: &ScoreTable) -> Result<()> {
    for (name, len) in [("y", table.y.len()), ("score", table.score.len())] {
        if len != table.x.len() {
            return Err(ViewerError::LengthMismatch {
                context: format!("score table x/{}", name),
                left: table.x.len(),
                right: len,
            }
            .into());
        }
    }

    let mut df = df![
        "x" => table.x.as_slice(),
        "y" => table.y.as_slice(),
        "score" => table.score.as_slice(),
    ]?;
    write_frame(path, &mut df)
}
