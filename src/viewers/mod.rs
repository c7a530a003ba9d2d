//! Viewers
//!
//! Each viewer turns loaded inputs into an owned [`Figure`](crate::figure::Figure):
//! - `world`: ally/enemy scatter
//! - `graph`: pivoted score heatmap with real-world tick labels
//! - `scores`: raw samples coloured by score

pub mod graph;
pub mod scores;
pub mod world;

pub use graph::{build_graph_figure, probe_row, rescaled_ticks, GraphView, ProbeOutcome};
pub use scores::{build_scores_figure, ScoresView, SCORES_TITLE};
pub use world::{build_world_figure, WORLD_TITLE};
