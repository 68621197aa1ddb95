//! Product Search Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
    products::{ProductResponse, errors::failure_message},
};

/// `{products, searchQuery}` payload for the search route.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchData {
    pub products: Vec<ProductResponse>,
    pub search_query: String,
}

/// Case-insensitive text search over the active catalog.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Json<Envelope<SearchData>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(query) = req.param::<String>("query") else {
        return Envelope::fail("Search query is required");
    };

    match state.app.catalog.search(&query).await {
        Ok(entries) => Envelope::ok(SearchData {
            products: entries.into_iter().map(Into::into).collect(),
            search_query: query,
        }),
        Err(error) => Envelope::fail(failure_message(&error, INTERNAL_MESSAGE)),
    }
}
