//! Products By Category Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
    products::{ProductResponse, errors::failure_message},
};

/// `{products, category}` payload for the category route.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CategoryData {
    pub products: Vec<ProductResponse>,
    pub category: String,
}

/// Active listings within one category, newest first.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Json<Envelope<CategoryData>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(category) = req.param::<String>("category") else {
        return Envelope::fail("Category is required");
    };

    match state.app.catalog.list_by_category(&category).await {
        Ok(entries) => Envelope::ok(CategoryData {
            products: entries.into_iter().map(Into::into).collect(),
            category,
        }),
        Err(error) => Envelope::fail(failure_message(&error, INTERNAL_MESSAGE)),
    }
}
