//! Rootfind CLI - Command-line interface for the secant solver.
//!
//! # Usage
//!
//! ```bash
//! # Solve x^2 - 2 = 0 from seeds 1 and 2
//! rootfind solve "x -> x^2 - 2" --x0 1 --x1 2 --tolerance 1e-9
//!
//! # Show every iteration as JSON
//! rootfind --format json solve "x^3 + x + 1" --x0 -1 --x1 0 --log
//!
//! # Write a settings file and use it
//! rootfind config init rootfind.toml
//! rootfind solve "cos(x) - x" --x0 0 --x1 1 --config rootfind.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Solver progress is logged at info level and only when --verbose is set
    let default_filter = if cli.quiet {
        "error"
    } else {
        "warn,rootfind_math=info,rootfind=info"
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Set up output format
    let format = cli.format;

    // Execute command
    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}
