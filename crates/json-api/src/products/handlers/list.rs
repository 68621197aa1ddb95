//! Product List Handler

use salvo::prelude::*;

use crate::{
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
    products::{ProductsData, errors::failure_message},
};

/// Public catalog browse: active listings, newest first.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Json<Envelope<ProductsData>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    match state.app.catalog.list().await {
        Ok(entries) => Envelope::ok(ProductsData {
            products: entries.into_iter().map(Into::into).collect(),
        }),
        Err(error) => Envelope::fail(failure_message(&error, INTERNAL_MESSAGE)),
    }
}
