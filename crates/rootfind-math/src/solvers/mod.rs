//! Root-finding algorithms.
//!
//! This module provides the secant method for scalar equations `f(x) = 0`:
//!
//! - [`SecantSolver`]: reusable solver holding a function, two seeds and a
//!   diagnostics sink
//! - [`secant`]: one-shot convenience wrapper returning [`SolverResult`]
//!
//! The secant method needs two distinct starting points but no derivative
//! and no bracket. Convergence is superlinear near a simple root and is not
//! guaranteed elsewhere; failures are reported as typed errors.
//!
//! # Convergence
//!
//! An iteration converges when either the step `|x_next - x_curr|` or the
//! residual `|f(x_next)|` drops below the configured tolerance. Both tests
//! use the same tolerance.
//!
//! # Example
//!
//! ```rust
//! use rootfind_math::solvers::{SecantSolver, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let mut solver = SecantSolver::new(f, 1.0, 2.0).unwrap();
//!
//! let root = solver.solve(&SolverConfig::new(1e-9, 100)).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```

mod secant;

pub use secant::{secant, SecantSolver};

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the tolerance is positive and finite and that at least
    /// one iteration is allowed.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input(
                "max_iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert!((config.tolerance - 1e-6).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_tolerance() {
        for tolerance in [0.0, -1e-6, f64::NAN, f64::INFINITY] {
            let err = SolverConfig::new(tolerance, 10).validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let err = SolverConfig::new(1e-6, 0).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_config_from_partial_toml() {
        let config: SolverConfig = toml::from_str("tolerance = 1e-9").unwrap();
        assert!((config.tolerance - 1e-9).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
