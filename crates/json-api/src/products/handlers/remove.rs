//! Remove Product Handler

use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::middleware::MISSING_MESSAGE,
    envelope::{Envelope, INTERNAL_MESSAGE, NoData},
    extensions::*,
    products::errors::{DELETE_FORBIDDEN_MESSAGE, failure_message},
};

#[derive(Debug, Deserialize)]
struct RemoveProductRequest {
    id: Uuid,
}

/// Hard-delete one of the caller's listings.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Json<Envelope<NoData>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(user) = depot.user_uuid() else {
        return Envelope::fail(MISSING_MESSAGE);
    };

    let Ok(body) = req.parse_json::<RemoveProductRequest>().await else {
        return Envelope::fail("Invalid request body");
    };

    match state.app.catalog.delete(user, body.id.into()).await {
        Ok(()) => Envelope::ok_with_message("Product removed successfully", NoData {}),
        Err(error) => Envelope::fail(failure_message(&error, DELETE_FORBIDDEN_MESSAGE)),
    }
}
