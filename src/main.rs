//! Branchview CLI - generate a static viewer site from a JSON export.

use branchview::site;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "branchview", version, about = "Static HTML viewer generator for branching-document JSON exports")]
struct Cli {
    /// Path to the JSON export file
    #[arg(default_value = "data.json")]
    input: PathBuf,

    /// Directory the site is generated into (wiped on every run)
    #[arg(long, default_value = "dist")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "branchview=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let summary = site::generate(&cli.input, &cli.out_dir)?;
    info!(
        "Done: {} documents rendered into {}",
        summary.written.len(),
        cli.out_dir.display()
    );
    Ok(())
}
