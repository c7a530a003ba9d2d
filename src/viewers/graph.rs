//! Graph viewer
//!
//! Pivots the long-form score table into a grid and draws it as a heatmap.
//! The heatmap lives in cell-index space, so tick labels are remapped to
//! real-world coordinates: `tick_count` labels from the observed minimum to
//! maximum, placed evenly from 0 to the cell count in the bounds file.

use crate::config::GraphOptions;
use crate::data::{Bounds, ScoreTable};
use crate::figure::{AxisTicks, ColorBar, Figure, Layer, Panel};
use crate::pivot::{pivot, Grid, LatticeReport};
use crate::utils::column_helpers::cell_as_f64;
use crate::utils::stats::{linspace, round_to, ScoreStats};
use anyhow::Result;
use polars::prelude::DataFrame;

/// Figure plus the numbers reported along the way
#[derive(Debug, Clone)]
pub struct GraphView {
    pub figure: Figure,
    pub stats: ScoreStats,
    pub lattice: LatticeReport,
}

/// Result of reading one score twice
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeOutcome {
    OutOfRange,
    Match(f64),
    Mismatch {
        by_label: Option<f64>,
        by_position: f64,
    },
}

/// Compare the score at `row` read through the DataFrame column against the
/// materialized vector
pub fn probe_row(df: &DataFrame, table: &ScoreTable, row: usize) -> ProbeOutcome {
    let Some(&by_position) = table.score.get(row) else {
        return ProbeOutcome::OutOfRange;
    };
    match cell_as_f64(df, "score", row) {
        Some(by_label) if by_label == by_position => ProbeOutcome::Match(by_position),
        by_label => ProbeOutcome::Mismatch {
            by_label,
            by_position,
        },
    }
}

/// Run the probe configured in `options` and log the outcome
pub fn log_probe(df: &DataFrame, table: &ScoreTable, options: &GraphOptions) {
    let Some(row) = options.probe_row else {
        return;
    };
    match probe_row(df, table, row) {
        ProbeOutcome::OutOfRange => {
            tracing::debug!(row, rows = table.len(), "probe row out of range, skipped")
        }
        ProbeOutcome::Match(score) => tracing::debug!(row, score, "probe: frame and vector agree"),
        ProbeOutcome::Mismatch {
            by_label,
            by_position,
        } => tracing::warn!(row, ?by_label, by_position, "probe: frame and vector disagree"),
    }
}

/// Ticks for one axis of the heatmap
///
/// Labels run from `data_min` to `data_max` rounded to two decimals;
/// positions run from 0 to `reference` in cell-index space.
pub fn rescaled_ticks(data_min: f64, data_max: f64, reference: usize, count: usize) -> AxisTicks {
    let positions = linspace(0.0, reference as f64, count);
    let labels = linspace(data_min, data_max, count)
        .into_iter()
        .map(|v| format_label(round_to(v, 2)))
        .collect();
    AxisTicks::new(positions, labels)
}

fn format_label(v: f64) -> String {
    // -0.0 prints as "-0"
    let v = v + 0.0;
    if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// Build the heatmap figure from loaded inputs
pub fn build_graph_figure(
    bounds: &Bounds,
    table: &ScoreTable,
    options: &GraphOptions,
    title: &str,
    dpi: u32,
) -> Result<GraphView> {
    let stats = ScoreStats::from_table(table)?;
    tracing::info!(
        min = stats.score_min,
        max = stats.score_max,
        rows = stats.rows,
        "score range"
    );
    tracing::info!(
        x_min = stats.x_min,
        x_max = stats.x_max,
        y_min = stats.y_min,
        y_max = stats.y_max,
        "sample extent"
    );

    let grid = pivot(table, options.duplicate_policy)?;
    let lattice = LatticeReport::new(&grid, bounds);
    if lattice.is_consistent() {
        tracing::debug!(columns = grid.width(), rows = grid.height(), "grid matches bounds");
    } else {
        tracing::warn!(
            actual = ?lattice.actual,
            implied = ?lattice.implied,
            reference = ?lattice.reference,
            missing = lattice.missing,
            "score grid does not match its bounds descriptor"
        );
    }

    let panel = heatmap_panel(grid, bounds, &stats, options).with_title(title);

    let figure = Figure::new(options.width_in, options.height_in)
        .with_dpi(dpi)
        .with_layout(options.layout.0, options.layout.1)
        .with_panel(panel);

    Ok(GraphView {
        figure,
        stats,
        lattice,
    })
}

fn heatmap_panel(grid: Grid, bounds: &Bounds, stats: &ScoreStats, options: &GraphOptions) -> Panel {
    let x_extent = grid.width().max(bounds.i_x) as f64;
    let y_extent = grid.height().max(bounds.i_y) as f64;

    let x_ticks = rescaled_ticks(stats.x_min, stats.x_max, bounds.i_x, options.tick_count);
    let mut y_ticks = rescaled_ticks(stats.y_min, stats.y_max, bounds.i_y, options.tick_count);
    if !options.invert_y {
        // Row 0 drawn at the top: measure tick positions from the top edge
        for p in &mut y_ticks.positions {
            *p = y_extent - *p;
        }
    }

    Panel::new((0.0, x_extent), (0.0, y_extent))
        .with_ticks(x_ticks, y_ticks)
        .with_axis_desc("x", "y")
        .with_colorbar(ColorBar {
            colormap: options.colormap,
            min: stats.score_min,
            max: stats.score_max,
        })
        .with_layer(Layer::Heatmap {
            grid,
            colormap: options.colormap,
            value_range: (stats.score_min, stats.score_max),
            invert_y: options.invert_y,
        })
}
