//! Owned figure model
//!
//! Viewers describe what to draw as plain data; `render` turns it into
//! pixels. Keeping the description separate means a viewer never touches
//! a drawing surface and its output can be inspected in tests.

use crate::data::Point;
use crate::pivot::Grid;
use crate::utils::colormap::Colormap;
use crate::utils::stats::linspace;
use plotters::style::RGBColor;

pub const DEFAULT_DPI: u32 = 100;

/// A page of `rows × cols` panels, filled in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub rows: usize,
    pub cols: usize,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
            dpi: DEFAULT_DPI,
            rows: 1,
            cols: 1,
            panels: Vec::new(),
        }
    }

    pub fn with_layout(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows.max(1);
        self.cols = cols.max(1);
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    /// Append a panel; panels beyond `rows × cols` are not rendered
    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * self.dpi as f64).round().max(1.0) as u32;
        (px(self.width_in), px(self.height_in))
    }

    pub fn slots(&self) -> usize {
        self.rows * self.cols
    }
}

/// One set of axes
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: Option<String>,
    pub show_grid: bool,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_ticks: AxisTicks,
    pub y_ticks: AxisTicks,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
    pub layers: Vec<Layer>,
    pub colorbar: Option<ColorBar>,
}

impl Panel {
    /// Panel over the given ranges with ten automatic ticks per axis
    pub fn new(x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            title: None,
            show_grid: false,
            x_range,
            y_range,
            x_ticks: AxisTicks::auto(x_range.0, x_range.1, 10),
            y_ticks: AxisTicks::auto(y_range.0, y_range.1, 10),
            x_desc: None,
            y_desc: None,
            layers: Vec::new(),
            colorbar: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn with_ticks(mut self, x_ticks: AxisTicks, y_ticks: AxisTicks) -> Self {
        self.x_ticks = x_ticks;
        self.y_ticks = y_ticks;
        self
    }

    pub fn with_axis_desc(mut self, x_desc: impl Into<String>, y_desc: impl Into<String>) -> Self {
        self.x_desc = Some(x_desc.into());
        self.y_desc = Some(y_desc.into());
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_colorbar(mut self, colorbar: ColorBar) -> Self {
        self.colorbar = Some(colorbar);
        self
    }

    /// Count scatter points drawn in `color` across all layers
    pub fn points_with_color(&self, color: RGBColor) -> usize {
        self.layers
            .iter()
            .map(|layer| match layer {
                Layer::Scatter {
                    points, color: c, ..
                } if *c == color => points.len(),
                _ => 0,
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// Uniformly coloured points
    Scatter {
        points: Vec<Point>,
        color: RGBColor,
        radius: u32,
        label: Option<String>,
    },
    /// Grid cells drawn as unit squares in cell-index space
    ///
    /// With `invert_y` the first row (smallest y) sits at the bottom.
    Heatmap {
        grid: Grid,
        colormap: Colormap,
        value_range: (f64, f64),
        invert_y: bool,
    },
    /// Points coloured by a value
    ColorScatter {
        points: Vec<(f64, f64, f64)>,
        colormap: Colormap,
        value_range: (f64, f64),
        radius: u32,
    },
}

/// Vertical colour legend drawn to the right of a panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBar {
    pub colormap: Colormap,
    pub min: f64,
    pub max: f64,
}

/// Tick positions with the label printed at each
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
}

impl AxisTicks {
    /// Pairs positions with labels; the shorter list wins
    pub fn new(positions: Vec<f64>, labels: Vec<String>) -> Self {
        let n = positions.len().min(labels.len());
        let mut positions = positions;
        let mut labels = labels;
        positions.truncate(n);
        labels.truncate(n);
        Self { positions, labels }
    }

    /// `n` evenly spaced ticks labelled with their own value
    pub fn auto(lo: f64, hi: f64, n: usize) -> Self {
        let span = (hi - lo).abs();
        let precision = if span >= 10.0 {
            0
        } else if span >= 1.0 {
            1
        } else {
            2
        };
        let positions = linspace(lo, hi, n);
        let labels = positions
            .iter()
            .map(|v| format!("{:.*}", precision, v))
            .collect();
        Self { positions, labels }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Label of the tick at `value`, empty when `value` is not a tick
    pub fn label_for(&self, value: f64) -> String {
        let tolerance = 1e-9 * value.abs().max(1.0);
        self.positions
            .iter()
            .position(|p| (p - value).abs() <= tolerance)
            .map(|i| self.labels[i].clone())
            .unwrap_or_default()
    }
}
