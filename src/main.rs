//! sdkgen CLI entrypoint
//! Parses command-line arguments and dispatches to the render pipeline.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::PathBuf;

use sdkgen::pipeline;

// External imports (alphabetized)
use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sdkgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the render plan describing the swagger source and output targets
    #[arg(short = 'g', long = "render-plan")]
    render_plan: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    // A missing plan file means no work at all: print usage and leave
    if !cli.render_plan.is_file() {
        error!(path = %cli.render_plan.display(), "Render plan file not found");
        Cli::command().print_help()?;
        std::process::exit(2);
    }

    info!("Starting sdkgen");
    pipeline::run(&cli.render_plan)
        .await
        .context("Generation run failed")?;

    Ok(())
}
