//! popsicle-api - CRUD service for popsicle records
//!
//! Records live in a concurrent in-memory store and are served over HTTP.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod popsicle;
