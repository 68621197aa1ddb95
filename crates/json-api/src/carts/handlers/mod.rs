//! Cart Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod update;

use serde::{Deserialize, Serialize};

use bazaar_app::domain::carts::models::CartData;

/// `{cartData}` payload shared by the cart routes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartPayload {
    pub cart_data: CartData,
}
