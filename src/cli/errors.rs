//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code. The rendered
//! message leads with a stable `POPSICLE_CLI_*` code.

use std::io;

use thiserror::Error;

/// Stable error codes printed ahead of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    ConfigError,
    IoError,
    ServeFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "POPSICLE_CLI_CONFIG_ERROR",
            Self::IoError => "POPSICLE_CLI_IO_ERROR",
            Self::ServeFailed => "POPSICLE_CLI_SERVE_FAILED",
        }
    }
}

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file unreadable, malformed, or failing validation
    #[error("POPSICLE_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    #[error("POPSICLE_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("POPSICLE_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Runtime, store or listener failure while serving
    #[error("POPSICLE_CLI_SERVE_FAILED: {0}")]
    ServeFailed(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::ServeFailed(msg.into())
    }

    pub fn code(&self) -> CliErrorCode {
        match self {
            CliError::Config(_) => CliErrorCode::ConfigError,
            CliError::Io(_) | CliError::Json(_) => CliErrorCode::IoError,
            CliError::ServeFailed(_) => CliErrorCode::ServeFailed,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
