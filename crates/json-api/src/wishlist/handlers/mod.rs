//! Wishlist Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod remove;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::listings::models::ListingUuid;

/// `{wishlist}` payload shared by the wishlist routes.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WishlistPayload {
    pub wishlist: Vec<Uuid>,
}

impl WishlistPayload {
    pub(crate) fn new(listings: Vec<ListingUuid>) -> Self {
        Self {
            wishlist: listings.into_iter().map(ListingUuid::into_uuid).collect(),
        }
    }
}
