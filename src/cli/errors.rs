//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code. The display
//! form leads with a stable `INV_CLI_*` code.

use std::io;

use thiserror::Error;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or environment error
    #[error("INV_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Writing to stdout failed
    #[error("INV_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// Resolved configuration could not be rendered
    #[error("INV_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server failed to start or stopped with an error
    #[error("INV_CLI_SERVE_FAILED: {0}")]
    ServeFailed(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::ServeFailed(msg.into())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
