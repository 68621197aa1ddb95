//! Wishlists service errors.

use thiserror::Error;

use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum WishlistsServiceError {
    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for WishlistsServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}
