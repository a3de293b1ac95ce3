//! # HTTP Server Module
//!
//! Axum server exposing the popsicle API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/popsicle` - List and create
//! - `/api/popsicle/search` - Filtered search
//! - `/api/popsicle/:id` - Read, replace, partial update, delete

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod popsicle_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
