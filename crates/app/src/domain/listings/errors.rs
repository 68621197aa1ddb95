//! Catalog service errors.

use thiserror::Error;

use crate::database::StoreError;

/// A rejected listing field. Raised before any state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one image is required")]
    NoImages,

    #[error("name must not be empty")]
    EmptyName,

    #[error("description must not be empty")]
    EmptyDescription,

    #[error("category must not be empty")]
    EmptyCategory,

    #[error("sub-category must not be empty")]
    EmptySubCategory,

    #[error("price must be a non-negative number")]
    NegativePrice,

    #[error("stock must be a non-negative integer")]
    InvalidStock,

    #[error("sizes must be a sequence of strings")]
    MalformedSizes,

    #[error("unknown condition label")]
    UnknownCondition,
}

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("listing not found")]
    NotFound,

    #[error("only the seller may modify this listing")]
    Forbidden,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for CatalogServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}
