//! Wishlist Errors

use tracing::error;

use bazaar_app::domain::wishlists::WishlistsServiceError;

use crate::envelope::INTERNAL_MESSAGE;

pub(crate) fn failure_message(error: &WishlistsServiceError) -> String {
    match error {
        WishlistsServiceError::Store(source) => {
            error!("wishlist storage failure: {source}");

            INTERNAL_MESSAGE.to_string()
        }
    }
}
