//! Utility modules for the viewers
//!
//! Contains shared functionality used across the viewers:
//! - Column helpers: Safe column extraction with validation
//! - Stats: Score summary, linspace and rounding for tick labels
//! - Colormap: Viridis and hot colour maps

pub mod column_helpers;
pub mod colormap;
pub mod stats;

// Re-export commonly used types
pub use column_helpers::{cell_as_f64, f64_at, f64_column, require_columns};
pub use colormap::Colormap;
pub use stats::{linspace, min_max, round_to, ScoreStats};
