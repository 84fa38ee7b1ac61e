//! CLI command implementations.

pub mod config;
pub mod solve;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use solve::SolveArgs;
