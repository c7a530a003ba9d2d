//! Figure rendering with plotters
//!
//! Draws an owned [`Figure`] onto a bitmap, either straight into a PNG file
//! or into an in-memory RGB buffer.

use crate::figure::{ColorBar, Figure, Layer, Panel};
use anyhow::{Context, Result};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const COLORBAR_WIDTH: u32 = 90;
const COLORBAR_STEPS: usize = 128;

/// Render `figure` to a PNG file, overwriting it
pub fn render_png(figure: &Figure, path: &Path) -> Result<()> {
    let size = figure.pixel_size();
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_figure(&root, figure)
        .with_context(|| format!("Failed to render figure to {}", path.display()))?;
    root.present()
        .with_context(|| format!("Failed to write image: {}", path.display()))?;
    Ok(())
}

/// Render `figure` into a packed RGB buffer of `width × height × 3` bytes
pub fn render_rgb(figure: &Figure) -> Result<Vec<u8>> {
    let (width, height) = figure.pixel_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_figure(&root, figure).context("Failed to render figure to buffer")?;
        root.present().context("Failed to flush figure buffer")?;
    }
    Ok(buffer)
}

fn draw_figure(root: &DrawingArea<BitMapBackend<'_>, Shift>, figure: &Figure) -> Result<()> {
    root.fill(&WHITE)?;

    let areas = root.split_evenly((figure.rows, figure.cols));
    if figure.panels.len() > areas.len() {
        tracing::warn!(
            panels = figure.panels.len(),
            slots = areas.len(),
            "figure has more panels than layout slots, extra panels are dropped"
        );
    }

    for (area, panel) in areas.iter().zip(&figure.panels) {
        draw_panel(area, panel)?;
    }

    Ok(())
}

fn draw_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, panel: &Panel) -> Result<()> {
    let (plot_area, bar_area) = match &panel.colorbar {
        Some(_) => {
            let width = area.dim_in_pixel().0;
            let split = width.saturating_sub(COLORBAR_WIDTH) as i32;
            let (left, right) = area.split_horizontally(split);
            (left, Some(right))
        }
        None => (area.clone(), None),
    };

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(10).x_label_area_size(40).y_label_area_size(60);
    if let Some(title) = &panel.title {
        builder.caption(title, ("sans-serif", 20));
    }

    let x_range = ordered(panel.x_range);
    let y_range = ordered(panel.y_range);
    let mut chart = builder.build_cartesian_2d(
        TickedAxis::new(x_range, &panel.x_ticks.positions),
        TickedAxis::new(y_range, &panel.y_ticks.positions),
    )?;

    let x_formatter = |v: &f64| panel.x_ticks.label_for(*v);
    let y_formatter = |v: &f64| panel.y_ticks.label_for(*v);

    let mut mesh = chart.configure_mesh();
    mesh.x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_labels(panel.x_ticks.len().max(1))
        .y_labels(panel.y_ticks.len().max(1));
    if !panel.show_grid {
        mesh.disable_mesh();
    }
    if let Some(desc) = &panel.x_desc {
        mesh.x_desc(desc.as_str());
    }
    if let Some(desc) = &panel.y_desc {
        mesh.y_desc(desc.as_str());
    }
    mesh.draw()?;

    let mut has_legend = false;
    for layer in &panel.layers {
        match layer {
            Layer::Scatter {
                points,
                color,
                radius,
                label,
            } => {
                let color = *color;
                let series = chart.draw_series(
                    points
                        .iter()
                        .map(|p| Circle::new((p.x, p.y), *radius, color.filled())),
                )?;
                if let Some(label) = label {
                    series
                        .label(label.as_str())
                        .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
                    has_legend = true;
                }
            }
            Layer::Heatmap {
                grid,
                colormap,
                value_range,
                invert_y,
            } => {
                // Without inversion row 0 hangs from the top of the panel
                let top = y_range.1;
                chart.draw_series(grid.cells().map(|(row, col, value)| {
                    let y0 = if *invert_y {
                        row as f64
                    } else {
                        top - 1.0 - row as f64
                    };
                    let x0 = col as f64;
                    Rectangle::new(
                        [(x0, y0), (x0 + 1.0, y0 + 1.0)],
                        colormap
                            .color_normalized(value, value_range.0, value_range.1)
                            .filled(),
                    )
                }))?;
            }
            Layer::ColorScatter {
                points,
                colormap,
                value_range,
                radius,
            } => {
                chart.draw_series(points.iter().map(|&(x, y, value)| {
                    Circle::new(
                        (x, y),
                        *radius,
                        colormap
                            .color_normalized(value, value_range.0, value_range.1)
                            .filled(),
                    )
                }))?;
            }
        }
    }

    if has_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    if let (Some(bar), Some(bar_area)) = (&panel.colorbar, bar_area) {
        draw_colorbar(&bar_area, bar)?;
    }

    Ok(())
}

fn draw_colorbar(area: &DrawingArea<BitMapBackend<'_>, Shift>, bar: &ColorBar) -> Result<()> {
    let (lo, hi) = if bar.max > bar.min {
        (bar.min, bar.max)
    } else {
        (bar.min - 0.5, bar.min + 0.5)
    };

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_top(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0f64..1.0f64, lo..hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .draw()?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let y0 = lo + step * i as f64;
        Rectangle::new(
            [(0.0, y0), (1.0, y0 + step)],
            bar.colormap.color_normalized(y0 + step / 2.0, lo, hi).filled(),
        )
    }))?;

    Ok(())
}

/// Linear f64 axis whose key points are exactly the panel's tick positions
struct TickedAxis {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickedAxis {
    fn new((lo, hi): (f64, f64), ticks: &[f64]) -> Self {
        Self {
            inner: (lo..hi).into(),
            ticks: ticks.iter().copied().filter(|t| (lo..=hi).contains(t)).collect(),
        }
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.max_num_points() == 0 {
            return Vec::new();
        }
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
