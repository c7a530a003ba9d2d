//! Pass Score Viewer
//!
//! Visual inspection of pass-trajectory scoring dumps.
//!
//! The pass optimiser writes three CSV files: robot positions (`world.csv`),
//! the sampling descriptor (`bounds.csv`) and one score per sampled target
//! point (`data.csv`). This crate loads them and renders:
//! - `viewers/world`: allies and enemies on the field
//! - `viewers/graph`: the score grid as a heatmap in real-world units
//! - `viewers/scores`: the raw samples coloured by score
//!
//! Layout:
//! - `data`: CSV loading with Polars
//! - `pivot`: long-form table → 2-D grid with an explicit duplicate policy
//! - `figure` / `render`: owned figure description, drawn with plotters
//! - `config` / `runner`: configuration and the run coordinator
//! - `utils/`: column helpers, statistics, colour maps

pub mod config;
pub mod data;
pub mod error;
pub mod figure;
pub mod pivot;
pub mod render;
pub mod runner;
pub mod utils;
pub mod viewers;
pub mod writer;

// Re-export commonly used types
pub use config::{Title, TitlePreset, ViewerConfig, ViewerKind};
pub use data::{Bounds, Point, ScoreTable, WorldSetup};
pub use error::ViewerError;
pub use figure::{AxisTicks, Figure, Layer, Panel};
pub use pivot::{pivot, DuplicatePolicy, Grid, LatticeReport};
pub use render::{render_png, render_rgb};
pub use runner::{build_figure, run, RunReport};
pub use utils::{Colormap, ScoreStats};
