//! CLI error types.

use std::path::PathBuf;

use rootfind_math::MathError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Solver or function error.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Settings file could not be parsed.
    #[error("Invalid settings file {path}: {message}")]
    Settings {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Refusing to overwrite an existing file.
    #[error("File already exists: {0}. Use --force to overwrite.")]
    FileExists(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
