//! Observability for the popsicle API
//!
//! Logging goes through `tracing`; this module only installs the subscriber.

mod logging;

pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
