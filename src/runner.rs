//! Run coordinator
//!
//! Loads the inputs the configured viewer needs, builds its figure and
//! writes the PNG.

use crate::config::{TitlePreset, ViewerConfig, ViewerKind};
use crate::data::{read_csv, Bounds, ScoreTable, WorldSetup};
use crate::figure::Figure;
use crate::pivot::LatticeReport;
use crate::render::render_png;
use crate::utils::stats::ScoreStats;
use crate::viewers::graph::log_probe;
use crate::viewers::{
    build_graph_figure, build_scores_figure, build_world_figure, SCORES_TITLE, WORLD_TITLE,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::create_dir_all;
use std::path::PathBuf;

/// What a run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub kind: ViewerKind,
    pub output: PathBuf,
    pub stats: Option<ScoreStats>,
    pub lattice: Option<LatticeReport>,
    /// `(allies, enemies)` drawn by the world viewer
    pub world_points: Option<(usize, usize)>,
}

/// Load, build and render according to `config`
pub fn run(config: &ViewerConfig) -> Result<RunReport> {
    let (figure, report) = build_figure(config)?;

    if let Some(parent) = report.output.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }
    }

    render_png(&figure, &report.output)?;
    tracing::info!(
        viewer = report.kind.as_str(),
        output = %report.output.display(),
        "figure saved"
    );

    Ok(report)
}

/// Load inputs and build the figure without rendering it
pub fn build_figure(config: &ViewerConfig) -> Result<(Figure, RunReport)> {
    let output = config.output_path();
    let kind = config.viewer_kind;
    tracing::info!(viewer = kind.as_str(), "building figure");

    match kind {
        ViewerKind::Graph => {
            let bounds = Bounds::load(&config.inputs.bounds)?;
            tracing::debug!(?bounds, "bounds loaded");

            let scores_path = &config.inputs.scores;
            let df = read_csv(scores_path)?;
            let table = ScoreTable::from_frame(&df, &scores_path.display().to_string())?;
            log_probe(&df, &table, &config.graph);

            let title = title_or(config, TitlePreset::OpponentsBlock.text());
            let view = build_graph_figure(&bounds, &table, &config.graph, &title, config.dpi)?;

            Ok((
                view.figure,
                RunReport {
                    kind,
                    output,
                    stats: Some(view.stats),
                    lattice: Some(view.lattice),
                    world_points: None,
                },
            ))
        }
        ViewerKind::World => {
            let world = WorldSetup::load(&config.inputs.world)?;
            tracing::info!(
                allies = world.allies.len(),
                enemies = world.enemies.len(),
                "world loaded"
            );

            let title = title_or(config, WORLD_TITLE);
            let figure = build_world_figure(&world, &config.world, &title, config.dpi);

            Ok((
                figure,
                RunReport {
                    kind,
                    output,
                    stats: None,
                    lattice: None,
                    world_points: Some((world.allies.len(), world.enemies.len())),
                },
            ))
        }
        ViewerKind::Scores => {
            let table = ScoreTable::load(&config.inputs.scores)?;
            let title = title_or(config, SCORES_TITLE);
            let view = build_scores_figure(&table, &config.scores, &title, config.dpi)?;

            Ok((
                view.figure,
                RunReport {
                    kind,
                    output,
                    stats: Some(view.stats),
                    lattice: None,
                    world_points: None,
                },
            ))
        }
    }
}

fn title_or(config: &ViewerConfig, default: &str) -> String {
    config
        .title
        .as_ref()
        .map(|t| t.text().to_string())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Title;

    #[test]
    fn test_title_or() {
        let mut config = ViewerConfig::default();
        assert_eq!(title_or(&config, "fallback"), "fallback");

        config.title = Some(Title::Preset(TitlePreset::Progress));
        assert_eq!(title_or(&config, "fallback"), "Progress on field bonus");
    }

    #[test]
    fn test_missing_input_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig {
            inputs: crate::config::InputPaths::in_dir(dir.path()),
            ..ViewerConfig::default()
        };

        let err = build_figure(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("bounds.csv"));
    }
}
