//! Viewer configuration
//!
//! File names, titles, the viewer to run and figure geometry all live here.
//! Defaults reproduce the stock behaviour:
//! the graph viewer reading `bounds.csv` and `data.csv` and writing
//! `block.png`.
//!
//! A JSON file may override any subset of fields; environment variables
//! override the JSON.

use crate::error::ViewerError;
use crate::pivot::DuplicatePolicy;
use crate::utils::colormap::Colormap;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_VIEWER_KIND: &str = "VIEWER_KIND";
pub const ENV_OUTPUT: &str = "VIEWER_OUTPUT";
pub const ENV_DATA_DIR: &str = "VIEWER_DATA_DIR";

/// Which viewer a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerKind {
    #[default]
    Graph,
    World,
    Scores,
}

impl ViewerKind {
    pub fn default_output(&self) -> &'static str {
        match self {
            ViewerKind::Graph => "block.png",
            ViewerKind::World => "world.png",
            ViewerKind::Scores => "scores.png",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerKind::Graph => "graph",
            ViewerKind::World => "world",
            ViewerKind::Scores => "scores",
        }
    }
}

impl FromStr for ViewerKind {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graph" | "heatmap" => Ok(ViewerKind::Graph),
            "world" => Ok(ViewerKind::World),
            "scores" | "scatter" => Ok(ViewerKind::Scores),
            _ => Err(ViewerError::UnknownViewer(s.to_string())),
        }
    }
}

/// Titles for the score components the pass optimiser dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePreset {
    OpponentsBlock,
    ClosestAlly,
    OpponentsColliding,
    Progress,
    Sum,
}

impl TitlePreset {
    pub fn text(&self) -> &'static str {
        match self {
            TitlePreset::OpponentsBlock => "Opponents blocking trajectory perpendicularly malus",
            TitlePreset::ClosestAlly => "Closest ally bonus",
            TitlePreset::OpponentsColliding => "Opponents collidng with pass trajectory malus",
            TitlePreset::Progress => "Progress on field bonus",
            TitlePreset::Sum => "Sum of all pass condition scores, with equal weight",
        }
    }
}

/// Figure title: a preset or free text
///
/// JSON: `{"preset": "closest_ally"}` or `{"text": "My title"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Title {
    Preset(TitlePreset),
    Text(String),
}

impl Title {
    pub fn text(&self) -> &str {
        match self {
            Title::Preset(preset) => preset.text(),
            Title::Text(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPaths {
    pub world: PathBuf,
    pub bounds: PathBuf,
    pub scores: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            world: PathBuf::from("world.csv"),
            bounds: PathBuf::from("bounds.csv"),
            scores: PathBuf::from("data.csv"),
        }
    }
}

impl InputPaths {
    /// Default file names under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        let defaults = Self::default();
        Self {
            world: dir.join(defaults.world),
            bounds: dir.join(defaults.bounds),
            scores: dir.join(defaults.scores),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    pub duplicate_policy: DuplicatePolicy,
    pub colormap: Colormap,
    /// Real-world y increasing upward, as in the world view
    pub invert_y: bool,
    pub tick_count: usize,
    /// Row whose score is read twice and compared, `None` to skip
    pub probe_row: Option<usize>,
    pub width_in: f64,
    pub height_in: f64,
    /// `(rows, cols)`; the heatmap occupies the first slot
    pub layout: (usize, usize),
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            colormap: Colormap::Viridis,
            invert_y: true,
            tick_count: 10,
            probe_row: Some(4502),
            width_in: 16.0,
            height_in: 10.0,
            layout: (2, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldOptions {
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
    pub width_in: f64,
    pub height_in: f64,
    pub ally_color: [u8; 3],
    pub enemy_color: [u8; 3],
    pub point_radius: u32,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            x_limits: (-4.5, 4.5),
            y_limits: (-3.0, 3.0),
            width_in: 16.0,
            height_in: 9.0,
            ally_color: [0, 0, 255],
            enemy_color: [255, 0, 0],
            point_radius: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterOptions {
    pub colormap: Colormap,
    pub point_radius: u32,
    pub width_in: f64,
    pub height_in: f64,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            colormap: Colormap::Hot,
            point_radius: 1,
            width_in: 16.0,
            height_in: 10.0,
        }
    }
}

/// Top-level configuration of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub viewer_kind: ViewerKind,
    pub inputs: InputPaths,
    /// Defaults to the viewer's own file name
    pub output: Option<PathBuf>,
    /// Defaults to the viewer's own title
    pub title: Option<Title>,
    pub dpi: u32,
    pub graph: GraphOptions,
    pub world: WorldOptions,
    pub scores: ScatterOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewer_kind: ViewerKind::Graph,
            inputs: InputPaths::default(),
            output: None,
            title: None,
            dpi: crate::figure::DEFAULT_DPI,
            graph: GraphOptions::default(),
            world: WorldOptions::default(),
            scores: ScatterOptions::default(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config JSON: {:?}", path))
    }

    /// Apply `VIEWER_KIND`, `VIEWER_OUTPUT` and `VIEWER_DATA_DIR` from the
    /// process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable source
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = lookup(ENV_VIEWER_KIND) {
            self.viewer_kind = kind
                .parse()
                .with_context(|| format!("Invalid {}", ENV_VIEWER_KIND))?;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            self.output = Some(PathBuf::from(output));
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.inputs = InputPaths::in_dir(Path::new(&dir));
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.viewer_kind.default_output()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_stock_run() {
        let config = ViewerConfig::default();
        assert_eq!(config.viewer_kind, ViewerKind::Graph);
        assert_eq!(config.inputs.bounds, PathBuf::from("bounds.csv"));
        assert_eq!(config.inputs.scores, PathBuf::from("data.csv"));
        assert_eq!(config.inputs.world, PathBuf::from("world.csv"));
        assert_eq!(config.output_path(), PathBuf::from("block.png"));
        assert_eq!(config.graph.layout, (2, 2));
        assert_eq!(config.graph.probe_row, Some(4502));
        assert_eq!(config.graph.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "viewer_kind": "world",
            "title": {"text": "Kickoff setup"},
            "world": {"point_radius": 8}
        }"#;
        let config: ViewerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.viewer_kind, ViewerKind::World);
        assert_eq!(config.title, Some(Title::Text("Kickoff setup".to_string())));
        assert_eq!(config.world.point_radius, 8);
        assert_eq!(config.world.x_limits, (-4.5, 4.5));
        assert_eq!(config.output_path(), PathBuf::from("world.png"));
    }

    #[test]
    fn test_title_preset_json() {
        let json = r#"{"title": {"preset": "closest_ally"}, "graph": {"duplicate_policy": "mean"}}"#;
        let config: ViewerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.title.as_ref().map(|t| t.text()), Some("Closest ally bonus"));
        assert_eq!(config.graph.duplicate_policy, DuplicatePolicy::Mean);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        fs::write(&path, r#"{"output": "out/heat.png", "dpi": 50}"#).unwrap();

        let config = ViewerConfig::load(&path).unwrap();
        assert_eq!(config.output_path(), PathBuf::from("out/heat.png"));
        assert_eq!(config.dpi, 50);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        fs::write(&path, "{not json").unwrap();

        let err = ViewerConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config JSON"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_VIEWER_KIND, "scores"),
            (ENV_OUTPUT, "/tmp/s.png"),
            (ENV_DATA_DIR, "runs/42"),
        ]
        .into_iter()
        .collect();

        let mut config = ViewerConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.viewer_kind, ViewerKind::Scores);
        assert_eq!(config.output_path(), PathBuf::from("/tmp/s.png"));
        assert_eq!(config.inputs.scores, PathBuf::from("runs/42/data.csv"));
        assert_eq!(config.inputs.world, PathBuf::from("runs/42/world.csv"));
    }

    #[test]
    fn test_unknown_viewer_kind() {
        let mut config = ViewerConfig::default();
        let err = config
            .apply_overrides(|name| (name == ENV_VIEWER_KIND).then(|| "radar".to_string()))
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ViewerError>(),
            Some(&ViewerError::UnknownViewer("radar".to_string()))
        );
    }

    #[test]
    fn test_viewer_kind_aliases() {
        assert_eq!("Heatmap".parse::<ViewerKind>(), Ok(ViewerKind::Graph));
        assert_eq!("scatter".parse::<ViewerKind>(), Ok(ViewerKind::Scores));
    }
}
