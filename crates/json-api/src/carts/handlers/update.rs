//! Update Cart Handler

use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::middleware::MISSING_MESSAGE,
    carts::{CartPayload, errors::failure_message},
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCartRequest {
    item_id: Uuid,
    size: String,
    quantity: u32,
}

/// Set a `(item, size)` quantity in the caller's cart; zero removes it.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Json<Envelope<CartPayload>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(user) = depot.user_uuid() else {
        return Envelope::fail(MISSING_MESSAGE);
    };

    let Ok(body) = req.parse_json::<UpdateCartRequest>().await else {
        return Envelope::fail("Invalid request body");
    };

    match state
        .app
        .carts
        .set_quantity(user, body.item_id.into(), &body.size, body.quantity)
        .await
    {
        Ok(cart_data) => Envelope::ok_with_message("Cart Updated", CartPayload { cart_data }),
        Err(error) => Envelope::fail(failure_message(&error)),
    }
}
