//! Solver settings file.
//!
//! Settings come from three layers, highest precedence first: command-line
//! flags, a TOML file, built-in defaults.
//!
//! ```toml
//! [solver]
//! tolerance = 1e-6
//! max_iterations = 1000
//! verbose = false
//! logging = false
//! ```

use std::path::Path;

use rootfind_math::diagnostics::SolverOptions;
use rootfind_math::solvers::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Contents of a settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Solver section.
    pub solver: SolverSettings,
}

/// `[solver]` section of a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    /// Convergence tolerance for both step and residual.
    pub tolerance: f64,
    /// Iteration budget.
    pub max_iterations: u32,
    /// Emit progress messages.
    pub verbose: bool,
    /// Record every iteration.
    pub logging: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            verbose: false,
            logging: false,
        }
    }
}

/// Values given on the command line; `None` / `false` defer to the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// `--tolerance`
    pub tolerance: Option<f64>,
    /// `--max-iterations`
    pub max_iterations: Option<u32>,
    /// `--verbose`
    pub verbose: bool,
    /// `--log`
    pub logging: bool,
}

impl Settings {
    /// Loads settings from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Settings {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Loads `path` if given, otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }

    /// Applies command-line overrides on top of the file values.
    #[must_use]
    pub fn resolve(&self, overrides: Overrides) -> (SolverConfig, SolverOptions) {
        let solver = &self.solver;
        let config = SolverConfig::new(
            overrides.tolerance.unwrap_or(solver.tolerance),
            overrides.max_iterations.unwrap_or(solver.max_iterations),
        );
        let options = SolverOptions::new(
            overrides.verbose || solver.verbose,
            overrides.logging || solver.logging,
        );
        (config, options)
    }
}
