//! Get Cart Handler

use salvo::prelude::*;

use crate::{
    auth::middleware::MISSING_MESSAGE,
    carts::{CartPayload, errors::failure_message},
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
};

/// The caller's saved cart.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Json<Envelope<CartPayload>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(user) = depot.user_uuid() else {
        return Envelope::fail(MISSING_MESSAGE);
    };

    match state.app.carts.fetch(user).await {
        Ok(cart_data) => Envelope::ok(CartPayload { cart_data }),
        Err(error) => Envelope::fail(failure_message(&error)),
    }
}
