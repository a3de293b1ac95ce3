//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::observability::{init_logging, LogLevel};
use crate::popsicle::{InMemoryPopsicleRepository, PopsicleRepository};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            log_level,
        } => serve(config.as_deref(), port, log_level),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Resolve the effective configuration for `serve`
pub fn resolve_config(
    config_path: Option<&Path>,
    port: Option<u16>,
    log_level: Option<LogLevel>,
) -> CliResult<Config> {
    let mut config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(port) = port {
        if port == 0 {
            return Err(CliError::config_error("--port must be > 0"));
        }
        config.server.port = port;
    }
    if let Some(level) = log_level {
        config.logging.level = level;
    }

    Ok(config)
}

/// Build the store described by the configuration
pub fn build_repository(config: &Config) -> CliResult<Arc<dyn PopsicleRepository>> {
    let repository = if config.store.seed_sample_data {
        InMemoryPopsicleRepository::with_sample_data()
            .map_err(|e| CliError::serve_failed(format!("Failed to seed store: {}", e)))?
    } else {
        InMemoryPopsicleRepository::new()
    };

    Ok(Arc::new(repository))
}

/// Record count for the startup log; a failing store is logged, not fatal
fn stored_record_count(repository: &dyn PopsicleRepository) -> Option<usize> {
    match repository.len() {
        Ok(records) => Some(records),
        Err(e) => {
            tracing::warn!(error = %e, "could not read store size");
            None
        }
    }
}

/// Start the HTTP server and block until it shuts down
pub fn serve(
    config_path: Option<&Path>,
    port: Option<u16>,
    log_level: Option<LogLevel>,
) -> CliResult<()> {
    let config = resolve_config(config_path, port, log_level)?;
    if !init_logging(&config.logging) {
        tracing::warn!(
            level = %config.logging.level,
            "a global subscriber was already installed; logging settings ignored"
        );
    }

    let repository = build_repository(&config)?;
    if let Some(records) = stored_record_count(repository.as_ref()) {
        tracing::info!(records, seeded = config.store.seed_sample_data, "store ready");
    }

    let server = HttpServer::new(config.server.clone(), repository);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate a configuration file and print the effective settings
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let mut stdout = io::stdout().lock();
    write_json(&mut stdout, &config)
}

fn write_json<W: Write, T: serde::Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
