// Viewer Integration Tests
//
// Purpose: Write a small optimiser dump (world, bounds, scores) to a scratch
//          directory and drive every viewer through the run coordinator
// Run with: cargo test --test viewer_integration_tests

use pass_score_viewer::config::InputPaths;
use pass_score_viewer::writer::{write_bounds, write_scores, write_world};
use pass_score_viewer::{
    build_figure, render_rgb, run, AxisTicks, Bounds, Colormap, DuplicatePolicy, Layer, Point,
    ScoreTable, ViewerConfig, ViewerError, ViewerKind, WorldSetup,
};
use approx::assert_relative_eq;
use plotters::style::RGBColor;
use std::path::Path;
use tempfile::TempDir;

const NX: usize = 9;
const NY: usize = 6;

/// Sampling grid shaped like the optimiser's: x from -4.5 by 1.0, y from -3.0 by 1.0
fn score_table() -> ScoreTable {
    let mut rows = Vec::new();
    for i in 0..NX {
        for j in 0..NY {
            let x = -4.5 + i as f64;
            let y = -3.0 + j as f64;
            // progress-on-field shaped bump
            let score = if x > 0.0 { -x * (x - 4.5) / 5.0 } else { -x * (x + 4.5) / 5.0 };
            rows.push((x, y, score + 0.1 * y));
        }
    }
    ScoreTable::from_rows(&rows)
}

fn write_dump(dir: &Path) {
    write_world(
        &dir.join("world.csv"),
        &WorldSetup {
            allies: vec![Point::new(0.3, -1.4), Point::new(1.5, 1.0), Point::new(-2.0, 0.0)],
            enemies: vec![Point::new(2.5, -0.5), Point::new(3.0, 1.5), Point::new(-1.0, 2.0)],
        },
    )
    .unwrap();
    write_bounds(
        &dir.join("bounds.csv"),
        &Bounds {
            x_step: 1.0,
            y_step: 1.0,
            i_x: NX,
            i_y: NY,
        },
    )
    .unwrap();
    write_scores(&dir.join("data.csv"), &score_table()).unwrap();
}

fn config_for(dir: &TempDir, kind: ViewerKind) -> ViewerConfig {
    ViewerConfig {
        viewer_kind: kind,
        inputs: InputPaths::in_dir(dir.path()),
        output: Some(dir.path().join(kind.default_output())),
        ..ViewerConfig::default()
    }
}

#[test]
fn test_graph_viewer_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());

    let (figure, report) = build_figure(&config_for(&dir, ViewerKind::Graph)).unwrap();

    let stats = report.stats.expect("graph run reports stats");
    let table = score_table();
    let true_min = table.score.iter().cloned().fold(f64::INFINITY, f64::min);
    let true_max = table.score.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(stats.rows, NX * NY);
    assert_relative_eq!(stats.score_min, true_min, epsilon = 1e-12);
    assert_relative_eq!(stats.score_max, true_max, epsilon = 1e-12);

    let lattice = report.lattice.expect("graph run reports lattice");
    assert_eq!(lattice.actual, (NX, NY));
    assert!(lattice.is_consistent());

    let panel = &figure.panels[0];
    assert_eq!(
        panel.title.as_deref(),
        Some("Opponents blocking trajectory perpendicularly malus")
    );
    assert_eq!(panel.x_ticks.labels.first().map(String::as_str), Some("-4.5"));
    assert_eq!(panel.x_ticks.labels.last().map(String::as_str), Some("3.5"));
    assert_eq!(panel.x_ticks.positions.last(), Some(&(NX as f64)));
    match &panel.layers[0] {
        Layer::Heatmap { grid, .. } => {
            assert_eq!(grid.missing_cells(), 0);
            for (x, y, score) in table.rows() {
                let cell = grid.value_at(x, y).expect("every sample has a cell");
                assert_relative_eq!(cell, score, epsilon = 1e-12);
            }
        }
        other => panic!("unexpected layer: {:?}", other),
    }
}

#[test]
fn test_world_viewer_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());

    let (figure, report) = build_figure(&config_for(&dir, ViewerKind::World)).unwrap();

    assert_eq!(report.world_points, Some((3, 3)));
    let panel = &figure.panels[0];
    assert_eq!(panel.points_with_color(RGBColor(0, 0, 255)), 3);
    assert_eq!(panel.points_with_color(RGBColor(255, 0, 0)), 3);
}

#[test]
fn test_scores_viewer_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());

    let (figure, report) = build_figure(&config_for(&dir, ViewerKind::Scores)).unwrap();

    assert_eq!(report.stats.map(|s| s.rows), Some(NX * NY));
    assert_eq!(figure.panels.len(), 1);
    assert!(figure.panels[0].colorbar.is_some());
}

#[test]
fn test_duplicate_samples_need_a_policy() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    let mut table = score_table();
    table.x.push(-4.5);
    table.y.push(-3.0);
    table.score.push(42.0);
    write_scores(&dir.path().join("data.csv"), &table).unwrap();

    let mut config = config_for(&dir, ViewerKind::Graph);
    let err = build_figure(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ViewerError>(),
        Some(ViewerError::DuplicateCell { .. })
    ));

    config.graph.duplicate_policy = DuplicatePolicy::Max;
    let (_, report) = build_figure(&config).unwrap();
    assert_eq!(report.stats.map(|s| s.score_max), Some(42.0));
}

#[test]
fn test_malformed_scores_fail_with_file_context() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    std::fs::write(dir.path().join("data.csv"), "x,y\n0.0,0.0\n").unwrap();

    let err = build_figure(&config_for(&dir, ViewerKind::Graph)).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("score"));
    assert!(msg.contains("data.csv"));
}

#[test]
fn test_graph_figure_renders_without_text() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    let config = ViewerConfig {
        dpi: 20,
        ..config_for(&dir, ViewerKind::Graph)
    };
    let (mut figure, report) = build_figure(&config).unwrap();

    // Strip every text element so no font is needed
    for panel in &mut figure.panels {
        panel.title = None;
        panel.x_desc = None;
        panel.y_desc = None;
        panel.colorbar = None;
        panel.x_ticks = AxisTicks::new(Vec::new(), Vec::new());
        panel.y_ticks = AxisTicks::new(Vec::new(), Vec::new());
    }

    let first = render_rgb(&figure).unwrap();
    let second = render_rgb(&figure).unwrap();
    assert_eq!(first.len(), 320 * 200 * 3);
    assert_eq!(first, second);

    let stats = report.stats.unwrap();
    let lowest = Colormap::Viridis.color_normalized(stats.score_min, stats.score_min, stats.score_max);
    assert!(first
        .chunks_exact(3)
        .any(|px| px == [lowest.0, lowest.1, lowest.2]));
}

#[test]
#[ignore] // Requires system fonts for text rendering
fn test_graph_png_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    let config = ViewerConfig {
        dpi: 40,
        ..config_for(&dir, ViewerKind::Graph)
    };

    let report = run(&config).unwrap();
    let first = std::fs::read(&report.output).unwrap();
    run(&config).unwrap();
    let second = std::fs::read(&report.output).unwrap();

    assert!(first.starts_with(b"\x89PNG"));
    assert_eq!(first, second);
}

#[test]
#[ignore] // Requires system fonts for text rendering
fn test_world_png_written() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    let config = ViewerConfig {
        dpi: 40,
        output: Some(dir.path().join("nested/out/world.png")),
        ..config_for(&dir, ViewerKind::World)
    };

    let report = run(&config).unwrap();
    assert!(report.output.exists());
}
