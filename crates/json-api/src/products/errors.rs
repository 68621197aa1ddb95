//! Product Errors

use tracing::error;

use bazaar_app::domain::listings::CatalogServiceError;

use crate::envelope::INTERNAL_MESSAGE;

pub(crate) const NOT_FOUND_MESSAGE: &str = "Product not found";
pub(crate) const UPDATE_FORBIDDEN_MESSAGE: &str = "You can only update your own products";
pub(crate) const DELETE_FORBIDDEN_MESSAGE: &str = "You can only delete your own products";

/// Envelope message for a catalog failure. Ownership violations read
/// differently for update and delete, so the caller supplies that text.
pub(crate) fn failure_message(error: &CatalogServiceError, forbidden: &str) -> String {
    match error {
        CatalogServiceError::Validation(validation) => validation.to_string(),
        CatalogServiceError::NotFound => NOT_FOUND_MESSAGE.to_string(),
        CatalogServiceError::Forbidden => forbidden.to_string(),
        CatalogServiceError::Store(source) => {
            error!("catalog storage failure: {source}");

            INTERNAL_MESSAGE.to_string()
        }
    }
}
