//! aerate CLI - Doxygen XML to reStructuredText.
//!
//! Provides commands for:
//! - `render`: Write one `.rst` document per Doxygen compound file
//! - `check`: Render everything without writing and report failures

mod commands;
mod doxygen;
mod error;
mod output;
mod pipeline;
mod scanner;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RenderArgs};
use output::Output;

/// aerate - Doxygen XML to reStructuredText.
#[derive(Parser)]
#[command(name = "aerate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render documented entities to reStructuredText.
    Render(RenderArgs),
    /// Check that every documented entity renders.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.input.verbose,
        Commands::Check(args) => args.input.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
