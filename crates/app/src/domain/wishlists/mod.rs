//! Wishlists
//!
//! One ordered list of listing ids per user.

pub mod errors;
pub mod service;
mod store;

pub use errors::WishlistsServiceError;
pub use service::*;
pub use store::*;
