//! Listings
//!
//! The catalog core: listing lifecycle, ownership rules and browse queries.

pub mod errors;
mod memory;
pub mod models;
mod pg;
pub mod service;
mod store;

pub use errors::{CatalogServiceError, ValidationError};
pub use memory::MemoryCatalogStore;
pub use pg::PgCatalogStore;
pub use service::*;
pub use store::*;
