//! World viewer
//!
//! Ally and enemy positions as two scatter layers over the field.

use crate::config::WorldOptions;
use crate::data::WorldSetup;
use crate::figure::{Figure, Layer, Panel};
use plotters::style::RGBColor;

pub const WORLD_TITLE: &str = "World setup, allies are blue, pass starts from (0.3, -1.4)";

pub fn build_world_figure(world: &WorldSetup, options: &WorldOptions, title: &str, dpi: u32) -> Figure {
    let [ar, ag, ab] = options.ally_color;
    let [er, eg, eb] = options.enemy_color;

    let panel = Panel::new(options.x_limits, options.y_limits)
        .with_title(title)
        .with_grid(true)
        .with_axis_desc("x (m)", "y (m)")
        .with_layer(Layer::Scatter {
            points: world.allies.clone(),
            color: RGBColor(ar, ag, ab),
            radius: options.point_radius,
            label: Some("allies".to_string()),
        })
        .with_layer(Layer::Scatter {
            points: world.enemies.clone(),
            color: RGBColor(er, eg, eb),
            radius: options.point_radius,
            label: Some("enemies".to_string()),
        });

    Figure::new(options.width_in, options.height_in)
        .with_dpi(dpi)
        .with_panel(panel)
}
