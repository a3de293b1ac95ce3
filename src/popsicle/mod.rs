//! # Popsicle Module
//!
//! The single managed resource: record model, transfer shapes, validation,
//! the concurrent in-memory store, search filters and the service that
//! ties them together.

pub mod dto;
pub mod errors;
pub mod model;
pub mod search;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

pub use dto::{CreatePopsicleRequest, PopsicleView, UpdatePopsicleRequest};
pub use errors::{FieldError, PopsicleError, PopsicleResult};
pub use model::{NewPopsicle, Patch, Popsicle, PopsiclePatch};
pub use search::{FilterSet, PopsicleFilter, SearchCriteria};
pub use service::PopsicleService;
pub use store::{InMemoryPopsicleRepository, PopsicleRepository};
