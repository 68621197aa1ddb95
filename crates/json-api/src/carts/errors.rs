//! Cart Errors

use tracing::error;

use bazaar_app::domain::carts::CartsServiceError;

use crate::envelope::INTERNAL_MESSAGE;

pub(crate) fn failure_message(error: &CartsServiceError) -> String {
    match error {
        CartsServiceError::Store(source) => {
            error!("cart storage failure: {source}");

            INTERNAL_MESSAGE.to_string()
        }
    }
}
