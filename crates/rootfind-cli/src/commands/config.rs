//! Config command implementation.
//!
//! Shows effective solver settings and writes settings files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_csv, print_header, print_json, print_success, print_table, KeyValue};
use crate::settings::Settings;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show effective settings (file values over defaults)
    Show(ShowArgs),

    /// Write a settings file with default values
    Init(InitArgs),
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Settings file (TOML)
    #[arg(short, long, env = "ROOTFIND_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the file
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show(show_args) => execute_show(show_args, format),
        ConfigCommand::Init(init_args) => execute_init(init_args),
    }
}

/// Show effective settings.
fn execute_show(args: ShowArgs, format: OutputFormat) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    let solver = &settings.solver;

    match format {
        OutputFormat::Table => {
            let source = args
                .config
                .as_ref()
                .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
            let results = vec![
                KeyValue::new("source", source),
                KeyValue::new("tolerance", format!("{:e}", solver.tolerance)),
                KeyValue::new("max_iterations", solver.max_iterations.to_string()),
                KeyValue::new("verbose", solver.verbose.to_string()),
                KeyValue::new("logging", solver.logging.to_string()),
            ];
            print_header("Solver Settings");
            print_table(&results);
        }
        OutputFormat::Json => {
            print_json(&settings)?;
        }
        OutputFormat::Csv => {
            print_csv([solver])?;
        }
        OutputFormat::Minimal => {
            println!("tolerance={:e}", solver.tolerance);
            println!("max_iterations={}", solver.max_iterations);
            println!("verbose={}", solver.verbose);
            println!("logging={}", solver.logging);
        }
    }

    Ok(())
}

/// Write a default settings file.
fn execute_init(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::FileExists(args.path).into());
    }

    if let Some(parent) = args.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(CliError::from)?;
        }
    }

    let content = Settings::default().to_toml_string()?;
    std::fs::write(&args.path, content).map_err(CliError::from)?;

    print_success(&format!("Wrote default settings to {}", args.path.display()));
    Ok(())
}
