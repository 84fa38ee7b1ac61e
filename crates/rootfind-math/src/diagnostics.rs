//! Progress messages and per-iteration telemetry for solvers.
//!
//! A solver never prints or stores anything itself. It talks to a
//! [`Diagnostics`] sink that offers two capabilities:
//!
//! - [`Diagnostics::emit`]: a human-readable progress message
//! - [`Diagnostics::append_log`]: one structured [`IterationRecord`]
//!
//! [`IterationLog`] is the built-in sink. It forwards messages to the `log`
//! facade and keeps records in memory so they can be read back after
//! `solve` returns.
//!
//! # Example
//!
//! ```rust
//! use rootfind_math::diagnostics::{IterationLog, SolverOptions};
//! use rootfind_math::solvers::{SecantSolver, SolverConfig};
//!
//! let options = SolverOptions::default().with_logging(true);
//! let mut solver = SecantSolver::with_options(|x: f64| x - 5.0, 0.0, 1.0, options).unwrap();
//!
//! let root = solver.solve(&SolverConfig::default()).unwrap();
//! assert_eq!(root, 5.0);
//! assert_eq!(solver.diagnostics().len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Log target used for solver progress messages.
pub const LOG_TARGET: &str = "rootfind_math::secant";

/// Output switches for a solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Emit progress messages.
    pub verbose: bool,
    /// Record one [`IterationRecord`] per iteration.
    pub logging: bool,
}

impl SolverOptions {
    /// Creates options with both switches set explicitly.
    #[must_use]
    pub fn new(verbose: bool, logging: bool) -> Self {
        Self { verbose, logging }
    }

    /// Sets the verbose switch.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the logging switch.
    #[must_use]
    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }
}

/// State of one completed secant iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Iteration index, starting at 1.
    pub iter: u32,
    /// Older of the two points the secant was drawn through.
    pub x_prev: f64,
    /// Newer of the two points the secant was drawn through.
    pub x_curr: f64,
    /// Candidate produced by this iteration.
    pub x_next: f64,
    /// Function value at `x_next`.
    #[serde(rename = "f(x)")]
    pub f_next: f64,
}

/// Receiver for solver messages and iteration records.
///
/// The predicates let the solver skip formatting and record construction
/// when a capability is switched off. Implementations must not panic and
/// have no way to influence the solver's control flow.
pub trait Diagnostics {
    /// Whether [`emit`](Self::emit) should be called.
    fn is_verbose(&self) -> bool;

    /// Whether [`append_log`](Self::append_log) should be called.
    fn is_logging(&self) -> bool;

    /// Receives a human-readable progress message.
    fn emit(&mut self, message: &str);

    /// Receives one iteration record, in increasing `iter` order.
    fn append_log(&mut self, record: IterationRecord);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn is_verbose(&self) -> bool {
        (**self).is_verbose()
    }

    fn is_logging(&self) -> bool {
        (**self).is_logging()
    }

    fn emit(&mut self, message: &str) {
        (**self).emit(message);
    }

    fn append_log(&mut self, record: IterationRecord) {
        (**self).append_log(record);
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Diagnostics for Silent {
    fn is_verbose(&self) -> bool {
        false
    }

    fn is_logging(&self) -> bool {
        false
    }

    fn emit(&mut self, _message: &str) {}

    fn append_log(&mut self, _record: IterationRecord) {}
}

/// Built-in sink: messages go to the `log` facade, records to memory.
///
/// Records are append-only from the solver's side. Repeated `solve` calls
/// keep appending; use [`take_records`](Self::take_records) to start over.
#[derive(Debug, Clone, Default)]
pub struct IterationLog {
    options: SolverOptions,
    records: Vec<IterationRecord>,
}

impl IterationLog {
    /// Creates an empty log with the given switches.
    #[must_use]
    pub fn new(options: SolverOptions) -> Self {
        Self {
            options,
            records: Vec::new(),
        }
    }

    /// Returns the switches this log was created with.
    #[must_use]
    pub fn options(&self) -> SolverOptions {
        self.options
    }

    /// Returns the recorded iterations in order.
    #[must_use]
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Removes and returns all recorded iterations.
    pub fn take_records(&mut self) -> Vec<IterationRecord> {
        std::mem::take(&mut self.records)
    }

    /// Number of recorded iterations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Diagnostics for IterationLog {
    fn is_verbose(&self) -> bool {
        self.options.verbose
    }

    fn is_logging(&self) -> bool {
        self.options.logging
    }

    fn emit(&mut self, message: &str) {
        log::info!(target: LOG_TARGET, "{}", message);
    }

    fn append_log(&mut self, record: IterationRecord) {
        self.records.push(record);
    }
}
