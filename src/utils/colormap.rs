//! Colour maps for score encoding
//!
//! Viridis comes from plotters' bundled colour maps; hot is the usual
//! black → red → yellow → white ramp, which plotters does not ship.

use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

// Channel breakpoints of the hot ramp
const HOT_RED_END: f64 = 0.365079;
const HOT_GREEN_END: f64 = 0.746032;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Viridis,
    Hot,
}

impl Colormap {
    /// Colour for `t` in `[0, 1]`; out-of-range values are clamped, NaN maps to 0
    pub fn color(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Viridis => viridis(t),
            Colormap::Hot => hot(t),
        }
    }

    /// Colour for `value` normalised against `[min, max]`
    ///
    /// A degenerate range (all scores equal) maps everything to the middle.
    pub fn color_normalized(&self, value: f64, min: f64, max: f64) -> RGBColor {
        let span = max - min;
        let t = if span > 0.0 && span.is_finite() {
            (value - min) / span
        } else {
            0.5
        };
        self.color(t)
    }
}

fn viridis(t: f64) -> RGBColor {
    ViridisRGB.get_color_normalized(t as f32, 0.0, 1.0)
}

fn hot(t: f64) -> RGBColor {
    let r = (t / HOT_RED_END).min(1.0);
    let g = ((t - HOT_RED_END) / (HOT_GREEN_END - HOT_RED_END)).clamp(0.0, 1.0);
    let b = ((t - HOT_GREEN_END) / (1.0 - HOT_GREEN_END)).clamp(0.0, 1.0);
    RGBColor(channel(r), channel(g), channel(b))
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round() as u8
}
