//! Score scatter viewer
//!
//! Quick look at the raw samples: one small point per row at its real-world
//! position, coloured by score. Needs no bounds file and tolerates any
//! sampling pattern, including duplicates.

use crate::config::ScatterOptions;
use crate::data::ScoreTable;
use crate::figure::{ColorBar, Figure, Layer, Panel};
use crate::utils::stats::ScoreStats;
use anyhow::Result;

pub const SCORES_TITLE: &str = "Pass score samples";

#[derive(Debug, Clone)]
pub struct ScoresView {
    pub figure: Figure,
    pub stats: ScoreStats,
}

pub fn build_scores_figure(
    table: &ScoreTable,
    options: &ScatterOptions,
    title: &str,
    dpi: u32,
) -> Result<ScoresView> {
    let stats = ScoreStats::from_table(table)?;
    tracing::info!(min = stats.score_min, max = stats.score_max, rows = stats.rows, "score range");

    let value_range = (stats.score_min, stats.score_max);
    let panel = Panel::new(padded(stats.x_min, stats.x_max), padded(stats.y_min, stats.y_max))
        .with_title(title)
        .with_axis_desc("x (m)", "y (m)")
        .with_layer(Layer::ColorScatter {
            points: table.rows().collect(),
            colormap: options.colormap,
            value_range,
            radius: options.point_radius,
        })
        .with_colorbar(ColorBar {
            colormap: options.colormap,
            min: stats.score_min,
            max: stats.score_max,
        });

    let figure = Figure::new(options.width_in, options.height_in)
        .with_dpi(dpi)
        .with_panel(panel);

    Ok(ScoresView { figure, stats })
}

// Keeps a one-sample extent drawable
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::colormap::Colormap;

    #[test]
    fn test_one_point_per_row() {
        let table = ScoreTable::from_rows(&[(0.0, 0.0, 1.0), (0.0, 0.0, 2.0), (1.0, -1.0, -3.0)]);
        let view = build_scores_figure(&table, &ScatterOptions::default(), SCORES_TITLE, 100).unwrap();

        let panel = &view.figure.panels[0];
        match &panel.layers[0] {
            Layer::ColorScatter {
                points,
                colormap,
                value_range,
                ..
            } => {
                assert_eq!(points.len(), 3);
                assert_eq!(*colormap, Colormap::Hot);
                assert_eq!(*value_range, (-3.0, 2.0));
            }
            other => panic!("unexpected layer: {:?}", other),
        }
        assert_eq!(panel.x_range, (0.0, 1.0));
        assert_eq!(panel.y_range, (-1.0, 0.0));
        assert!(panel.colorbar.is_some());
    }

    #[test]
    fn test_single_sample_extent_is_padded() {
        let table = ScoreTable::from_rows(&[(2.0, 1.0, 0.5)]);
        let view = build_scores_figure(&table, &ScatterOptions::default(), "t", 100).unwrap();
        assert_eq!(view.figure.panels[0].x_range, (1.5, 2.5));
    }
}
