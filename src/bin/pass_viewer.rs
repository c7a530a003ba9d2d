// Pass Viewer Entry Point
//
// Purpose: Render one of the score viewers to a PNG
// Usage: cargo run --bin pass_viewer -- [config.json]

use pass_score_viewer::{run, ViewerConfig};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pass_score_viewer=info,pass_viewer=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration: optional JSON file, then environment overrides
    let mut config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading config: {}", path);
            ViewerConfig::load(Path::new(&path))?
        }
        None => ViewerConfig::default(),
    };
    config.apply_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  VIEWER: {}", config.viewer_kind.as_str());
    tracing::info!("  OUTPUT: {}", config.output_path().display());

    let report = run(&config)?;

    if let Some(stats) = &report.stats {
        tracing::info!("Min : {}, Max : {}", stats.score_min, stats.score_max);
    }
    tracing::info!("Saved {}", report.output.display());

    Ok(())
}
