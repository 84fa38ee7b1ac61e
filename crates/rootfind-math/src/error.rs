//! Error types for root-finding operations.

use thiserror::Error;

/// A specialized Result type for root-finding operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while configuring or running a solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The supplied function cannot be invoked.
    #[error("Function is not callable: {reason}")]
    NotCallable {
        /// Why the function could not be built.
        reason: String,
    },

    /// The supplied function does not take exactly one argument.
    #[error("Function must take exactly {expected} argument(s), got {actual}")]
    ArityMismatch {
        /// Required number of arguments.
        expected: usize,
        /// Number of arguments the function declares.
        actual: usize,
    },

    /// The two initial points are identical.
    #[error("Initial points must be different: x0 = x1 = {x}")]
    DegenerateInput {
        /// The repeated point.
        x: f64,
    },

    /// Two consecutive function values are equal, so the secant line is flat.
    #[error("Zero slope in secant update at iteration {iteration}: f = {value:.6e} twice")]
    ZeroSlope {
        /// Iteration at which the flat secant was detected (1-based).
        iteration: u32,
        /// The repeated function value.
        value: f64,
    },

    /// Root-finding algorithm failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

/// Fieldless discriminant of [`MathError`], for matching on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`MathError::NotCallable`].
    NotCallable,
    /// See [`MathError::ArityMismatch`].
    ArityMismatch,
    /// See [`MathError::DegenerateInput`].
    DegenerateInput,
    /// See [`MathError::ZeroSlope`].
    ZeroSlope,
    /// See [`MathError::ConvergenceFailed`].
    ConvergenceFailed,
    /// See [`MathError::InvalidInput`].
    InvalidInput,
}

impl MathError {
    /// Creates a not-callable error.
    #[must_use]
    pub fn not_callable(reason: impl Into<String>) -> Self {
        Self::NotCallable {
            reason: reason.into(),
        }
    }

    /// Creates an arity error for a function that should take one argument.
    #[must_use]
    pub fn arity_mismatch(actual: usize) -> Self {
        Self::ArityMismatch {
            expected: 1,
            actual,
        }
    }

    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotCallable { .. } => ErrorKind::NotCallable,
            Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Self::DegenerateInput { .. } => ErrorKind::DegenerateInput,
            Self::ZeroSlope { .. } => ErrorKind::ZeroSlope,
            Self::ConvergenceFailed { .. } => ErrorKind::ConvergenceFailed,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }

    /// Returns true if the error was raised while configuring a solver
    /// rather than while iterating.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NotCallable
                | ErrorKind::ArityMismatch
                | ErrorKind::DegenerateInput
                | ErrorKind::InvalidInput
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed(100, 1e-6);
        assert!(err.to_string().contains("100 iterations"));
    }

    #[test]
    fn test_arity_display() {
        let err = MathError::arity_mismatch(2);
        assert_eq!(
            err.to_string(),
            "Function must take exactly 1 argument(s), got 2"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            MathError::DegenerateInput { x: 3.0 }.kind(),
            ErrorKind::DegenerateInput
        );
        assert_eq!(
            MathError::ZeroSlope {
                iteration: 1,
                value: 1.0
            }
            .kind(),
            ErrorKind::ZeroSlope
        );
        assert!(MathError::not_callable("bad").is_configuration_error());
        assert!(!MathError::convergence_failed(5, 1.0).is_configuration_error());
    }
}
