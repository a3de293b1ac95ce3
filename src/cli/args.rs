//! CLI argument definitions using clap
//!
//! Commands:
//! - popsicle-api serve [--config <path>] [--port <port>] [--log-level <level>]
//! - popsicle-api check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogLevel;

/// Popsicle API - CRUD service for popsicle records
#[derive(Parser, Debug)]
#[command(name = "popsicle-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overrides the configuration file
        #[arg(long)]
        port: Option<u16>,

        /// Log level (trace, debug, info, warn, error), overrides the configuration file
        #[arg(long)]
        log_level: Option<LogLevel>,
    },

    /// Load and validate a configuration file, then print the effective settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./popsicle.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
