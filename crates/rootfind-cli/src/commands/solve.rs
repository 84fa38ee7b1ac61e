//! Solve command implementation.
//!
//! Compiles a function expression and runs the secant solver on it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use rootfind_math::diagnostics::IterationRecord;
use rootfind_math::expression::compile;
use rootfind_math::solvers::{SecantSolver, SolverConfig, SolverResult};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{
    format_sci, print_csv, print_header, print_iterations, print_json, print_table, KeyValue,
};
use crate::settings::{Overrides, Settings};

/// Arguments for the solve command.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Function of one variable, e.g. "x -> x^2 - 2"
    #[arg(allow_hyphen_values = true)]
    pub function: String,

    /// First initial guess
    #[arg(long, allow_negative_numbers = true)]
    pub x0: f64,

    /// Second initial guess (must differ from x0)
    #[arg(long, allow_negative_numbers = true)]
    pub x1: f64,

    /// Convergence tolerance for step and residual [default: 1e-6]
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Maximum number of iterations [default: 1000]
    #[arg(short = 'n', long)]
    pub max_iterations: Option<u32>,

    /// Settings file (TOML)
    #[arg(short, long, env = "ROOTFIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print solver progress to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Record and print every iteration, also when the solve fails
    #[arg(short, long)]
    pub log: bool,
}

/// Summary of a successful solve.
#[derive(Debug, Serialize)]
pub struct SolveSummary {
    pub function: String,
    pub x0: f64,
    pub x1: f64,
    pub root: f64,
    pub residual: f64,
    pub iterations: u32,
    pub tolerance: f64,
    pub max_iterations: u32,
}

/// JSON document: the summary plus the iteration log when recorded.
#[derive(Debug, Serialize)]
struct SolveReport<'a> {
    #[serde(flatten)]
    summary: &'a SolveSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    log: Option<&'a [IterationRecord]>,
}

/// Execute the solve command.
pub fn execute(args: SolveArgs, format: OutputFormat) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    let (config, options) = settings.resolve(Overrides {
        tolerance: args.tolerance,
        max_iterations: args.max_iterations,
        verbose: args.verbose,
        logging: args.log,
    });

    let function = compile(&args.function).map_err(CliError::from)?;
    tracing::debug!("Compiled {} in variable {}", function, function.variable());

    let mut solver = SecantSolver::with_options(|x| function.eval(x), args.x0, args.x1, options)
        .map_err(CliError::from)?;
    let outcome = solver.solve_detailed(&config);

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            // Show how far the iteration got before failing
            if options.logging && !solver.records().is_empty() {
                print_iterations(solver.records(), format)?;
            }
            return Err(CliError::from(err).into());
        }
    };

    let summary = summarize(&args, &config, &result);

    match format {
        OutputFormat::Table => {
            print_header("Secant Solve");
            print_table(&summary_rows(&summary));
            if options.logging {
                print_iterations(solver.records(), format)?;
            }
        }
        OutputFormat::Json => {
            let report = SolveReport {
                summary: &summary,
                log: options.logging.then(|| solver.records()),
            };
            print_json(&report)?;
        }
        OutputFormat::Csv => {
            if options.logging {
                print_iterations(solver.records(), format)?;
            } else {
                print_csv([&summary])?;
            }
        }
        OutputFormat::Minimal => {
            println!("{}", result.root);
        }
    }

    Ok(())
}

fn summarize(args: &SolveArgs, config: &SolverConfig, result: &SolverResult) -> SolveSummary {
    SolveSummary {
        function: args.function.trim().to_string(),
        x0: args.x0,
        x1: args.x1,
        root: result.root,
        residual: result.residual,
        iterations: result.iterations,
        tolerance: config.tolerance,
        max_iterations: config.max_iterations,
    }
}

fn summary_rows(summary: &SolveSummary) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Function", summary.function.clone()),
        KeyValue::new("x0", summary.x0.to_string()),
        KeyValue::new("x1", summary.x1.to_string()),
        KeyValue::new("Root", summary.root.to_string()),
        KeyValue::new("f(root)", format_sci(summary.residual)),
        KeyValue::new("Iterations", summary.iterations.to_string()),
        KeyValue::new("Tolerance", format!("{:e}", summary.tolerance)),
        KeyValue::new("Max Iterations", summary.max_iterations.to_string()),
    ]
}
