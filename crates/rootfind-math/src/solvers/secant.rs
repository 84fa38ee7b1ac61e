//! Secant root-finding algorithm.

use std::fmt;

use crate::diagnostics::{Diagnostics, IterationLog, IterationRecord, Silent, SolverOptions};
use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Secant root-finding solver.
///
/// Similar to Newton-Raphson but approximates the derivative using the
/// finite difference through the two most recent iterates. Needs two
/// distinct starting points, no analytical derivative and no bracket.
///
/// Convergence rate is superlinear (order ~1.618, the golden ratio) near a
/// simple root.
///
/// The solver owns its function, its seeds and a [`Diagnostics`] sink. It
/// can be solved repeatedly; each call starts again from the stored seeds.
///
/// # Example
///
/// ```rust
/// use rootfind_math::diagnostics::SolverOptions;
/// use rootfind_math::solvers::{SecantSolver, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let options = SolverOptions::default().with_logging(true);
/// let mut solver = SecantSolver::with_options(f, 1.0, 2.0, options).unwrap();
///
/// let root = solver.solve(&SolverConfig::new(1e-9, 100)).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-8);
/// assert_eq!(solver.records().len(), 5);
/// ```
#[derive(Clone)]
pub struct SecantSolver<F, D = IterationLog> {
    function: F,
    x0: f64,
    x1: f64,
    diagnostics: D,
}

// Closures are not `Debug`, so the function is left out.
impl<F, D: fmt::Debug> fmt::Debug for SecantSolver<F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecantSolver")
            .field("x0", &self.x0)
            .field("x1", &self.x1)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl<F> SecantSolver<F, IterationLog>
where
    F: Fn(f64) -> f64,
{
    /// Creates a solver with verbose output and logging switched off.
    ///
    /// Fails with [`MathError::DegenerateInput`] if `x0 == x1`.
    pub fn new(function: F, x0: f64, x1: f64) -> MathResult<Self> {
        Self::with_options(function, x0, x1, SolverOptions::default())
    }

    /// Creates a solver backed by an [`IterationLog`] with the given switches.
    pub fn with_options(function: F, x0: f64, x1: f64, options: SolverOptions) -> MathResult<Self> {
        Self::with_diagnostics(function, x0, x1, IterationLog::new(options))
    }

    /// Iteration records collected so far, oldest first.
    #[must_use]
    pub fn records(&self) -> &[IterationRecord] {
        self.diagnostics.records()
    }
}

impl<F, D> SecantSolver<F, D>
where
    F: Fn(f64) -> f64,
    D: Diagnostics,
{
    /// Creates a solver reporting to a caller-supplied sink.
    pub fn with_diagnostics(function: F, x0: f64, x1: f64, diagnostics: D) -> MathResult<Self> {
        ensure_distinct(x0, x1)?;
        Ok(Self {
            function,
            x0,
            x1,
            diagnostics,
        })
    }

    /// Replaces the function.
    ///
    /// To swap between different closures, instantiate the solver with a
    /// function pointer or a `Box<dyn Fn(f64) -> f64>`.
    pub fn set_function(&mut self, function: F) {
        self.function = function;
    }

    /// Replaces the seeds.
    ///
    /// Fails with [`MathError::DegenerateInput`] if `x0 == x1`, in which
    /// case the previous seeds are kept.
    pub fn set_initial_points(&mut self, x0: f64, x1: f64) -> MathResult<()> {
        ensure_distinct(x0, x1)?;
        self.x0 = x0;
        self.x1 = x1;
        Ok(())
    }

    /// Returns the seeds `(x0, x1)`.
    #[must_use]
    pub fn initial_points(&self) -> (f64, f64) {
        (self.x0, self.x1)
    }

    /// Returns the function.
    pub fn function(&self) -> &F {
        &self.function
    }

    /// Returns the diagnostics sink.
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Returns the diagnostics sink mutably.
    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }

    /// Consumes the solver, returning its sink.
    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }

    /// Finds a root and returns it.
    ///
    /// See [`solve_detailed`](Self::solve_detailed) for the algorithm and
    /// the possible errors.
    pub fn solve(&mut self, config: &SolverConfig) -> MathResult<f64> {
        self.solve_detailed(config).map(|result| result.root)
    }

    /// Finds a root using [`SolverConfig::default`].
    pub fn solve_default(&mut self) -> MathResult<f64> {
        self.solve(&SolverConfig::default())
    }

    /// Finds a root and returns it with iteration statistics.
    ///
    /// The two seed evaluations are not counted against
    /// `config.max_iterations`. Each iteration evaluates the function once.
    ///
    /// # Errors
    ///
    /// - [`MathError::InvalidInput`] if the configuration is invalid
    /// - [`MathError::ZeroSlope`] if two consecutive function values are
    ///   exactly equal
    /// - [`MathError::ConvergenceFailed`] if the iteration budget runs out
    #[allow(clippy::float_cmp)]
    pub fn solve_detailed(&mut self, config: &SolverConfig) -> MathResult<SolverResult> {
        config.validate()?;

        let f = &self.function;
        let sink = &mut self.diagnostics;
        let tolerance = config.tolerance;

        let mut x_prev = self.x0;
        let mut x_curr = self.x1;
        let mut f_prev = f(x_prev);
        let mut f_curr = f(x_curr);

        if sink.is_verbose() {
            sink.emit(&format!(
                "secant: x0 = {x_prev}, x1 = {x_curr}, tolerance = {tolerance:e}, max_iterations = {}",
                config.max_iterations
            ));
        }

        for iteration in 1..=config.max_iterations {
            // Flat secant line: the update below would divide by zero
            if f_curr == f_prev {
                if sink.is_verbose() {
                    sink.emit(&format!(
                        "secant: zero slope at iteration {iteration} (f = {f_curr:e} at x = {x_prev} and x = {x_curr})"
                    ));
                }
                return Err(MathError::ZeroSlope {
                    iteration,
                    value: f_curr,
                });
            }

            // Secant step: x_next = x_curr - f(x_curr) * (x_curr - x_prev) / (f(x_curr) - f(x_prev))
            let x_next = x_curr - f_curr * (x_curr - x_prev) / (f_curr - f_prev);
            let f_next = f(x_next);

            if sink.is_logging() {
                sink.append_log(IterationRecord {
                    iter: iteration,
                    x_prev,
                    x_curr,
                    x_next,
                    f_next,
                });
            }
            if sink.is_verbose() {
                sink.emit(&format!(
                    "secant: iteration {iteration}: x = {x_next}, f(x) = {f_next:e}"
                ));
            }

            // Step or residual below tolerance
            if (x_next - x_curr).abs() < tolerance || f_next.abs() < tolerance {
                if sink.is_verbose() {
                    sink.emit(&format!(
                        "secant: converged to {x_next} after {iteration} iteration(s)"
                    ));
                }
                return Ok(SolverResult {
                    root: x_next,
                    iterations: iteration,
                    residual: f_next,
                });
            }

            x_prev = x_curr;
            f_prev = f_curr;
            x_curr = x_next;
            f_curr = f_next;
        }

        if sink.is_verbose() {
            sink.emit(&format!(
                "secant: no convergence after {} iterations (last x = {x_curr}, f(x) = {f_curr:e})",
                config.max_iterations
            ));
        }

        Err(MathError::convergence_failed(
            config.max_iterations,
            f_curr.abs(),
        ))
    }
}

#[allow(clippy::float_cmp)]
fn ensure_distinct(x0: f64, x1: f64) -> MathResult<()> {
    if x0 == x1 {
        return Err(MathError::DegenerateInput { x: x0 });
    }
    Ok(())
}

/// Secant root-finding algorithm.
///
/// One-shot form of [`SecantSolver`]: no progress messages and no
/// iteration records.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (must be different from x0)
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or an error if the seeds coincide,
/// the secant line becomes flat, or convergence fails.
///
/// # Example
///
/// ```rust
/// use rootfind_math::solvers::{secant, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(f, 1.0, 2.0, &SolverConfig::new(1e-10, 100)).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut solver = SecantSolver::with_diagnostics(f, x0, x1, Silent)?;
    solver.solve_detailed(config)
}
