//! CLI module for the popsicle API
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - check-config: Validate a configuration file

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{build_repository, check_config, resolve_config, run, run_command, serve};
pub use config::{Config, StoreConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
