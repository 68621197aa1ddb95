//! Add To Wishlist Handler

use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::middleware::MISSING_MESSAGE,
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
    wishlist::{WishlistPayload, errors::failure_message},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WishlistAddRequest {
    product_id: Uuid,
}

/// Add a listing to the caller's wishlist and return the updated list.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Json<Envelope<WishlistPayload>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(user) = depot.user_uuid() else {
        return Envelope::fail(MISSING_MESSAGE);
    };

    let Ok(body) = req.parse_json::<WishlistAddRequest>().await else {
        return Envelope::fail("Invalid request body");
    };

    match state.app.wishlists.add(user, body.product_id.into()).await {
        Ok(listings) => Envelope::ok(WishlistPayload::new(listings)),
        Err(error) => Envelope::fail(failure_message(&error)),
    }
}
