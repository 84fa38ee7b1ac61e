//! # Rootfind Math
//!
//! Secant-method root finding for scalar functions.
//!
//! This crate provides:
//!
//! - **Solvers**: [`SecantSolver`](solvers::SecantSolver) and the one-shot
//!   [`secant`](solvers::secant) function
//! - **Diagnostics**: progress messages and per-iteration records through an
//!   injectable [`Diagnostics`](diagnostics::Diagnostics) sink
//! - **Expressions**: compile text such as `x -> x^2 - 2` into a callable,
//!   checking callability and arity once
//!
//! ## Design Philosophy
//!
//! - **Typed failures**: every way a solve can fail is a [`MathError`] variant
//! - **Exact semantics**: seed and slope degeneracy use exact float equality
//! - **No hidden state**: each solve starts from the stored seeds
//!
//! ## Example
//!
//! ```rust
//! use rootfind_math::prelude::*;
//!
//! let mut solver = SecantSolver::new(|x: f64| x - 5.0, 0.0, 1.0).unwrap();
//! assert_eq!(solver.solve_default().unwrap(), 5.0);
//!
//! let err = SecantSolver::new(|x: f64| x, 3.0, 3.0).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DegenerateInput);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]

pub mod diagnostics;
pub mod error;
pub mod expression;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::diagnostics::{Diagnostics, IterationLog, IterationRecord, Silent, SolverOptions};
    pub use crate::error::{ErrorKind, MathError, MathResult};
    pub use crate::expression::{compile, Expression, UnaryFunction};
    pub use crate::solvers::{secant, SecantSolver, SolverConfig, SolverResult};
}

pub use error::{ErrorKind, MathError, MathResult};
