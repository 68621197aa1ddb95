//! Single Product Handler

use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
    products::{ProductData, errors::failure_message},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SingleProductRequest {
    product_id: Uuid,
}

/// Fetch one listing by id. Deliberately unrestricted: an inactive or
/// foreign listing is still reachable through its permalink.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Json<Envelope<ProductData>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Ok(body) = req.parse_json::<SingleProductRequest>().await else {
        return Envelope::fail("Invalid request body");
    };

    match state.app.catalog.get(body.product_id.into()).await {
        Ok(entry) => Envelope::ok(ProductData {
            product: entry.into(),
        }),
        Err(error) => Envelope::fail(failure_message(&error, INTERNAL_MESSAGE)),
    }
}
