//! Crate-level error types.
//!
//! This module defines the error types surfaced by the CLI layer. Composer
//! errors live in [`crate::bootstrap::error`] and are wrapped here.

use thiserror::Error;

/// Result type alias for top-level operations
pub type Result<T> = std::result::Result<T, BootjarError>;

/// Main error type for all bootjar operations
#[derive(Error, Debug)]
pub enum BootjarError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Composer errors
    #[error("{0}")]
    Bootstrap(#[from] crate::bootstrap::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Input document could not be used
    #[error("Invalid artifact graph: {reason}")]
    InvalidGraph {
        /// Reason for the error
        reason: String,
    },
}
