//! dmgmonkey: search update packages and print their download links as JSON

use anyhow::Result;
use clap::Parser;
use dmgmonkey::{config, Pipeline};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Search macOS update packages and resolve the download link of every match
#[derive(Debug, Parser)]
#[command(name = "dmgmonkey", version, about)]
struct Cli {
    /// Search keyword, e.g. "Security Update"
    query: String,

    /// Path to a settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the report, logs go to stderr
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    debug!("dmgmonkey v{}", dmgmonkey::VERSION);

    let settings = config::load(cli.config.as_deref())?;
    let pipeline = Pipeline::new(&settings)?;

    let report = pipeline.run(&cli.query).await;
    println!("{}", report.to_json()?);

    Ok(())
}
