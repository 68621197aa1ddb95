//! Carts service errors.

use thiserror::Error;

use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for CartsServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}
