//! Add To Cart Handler

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
struct AddToCartRequest {
    item_id: Uuid,
    size: String,
}

/// Add one unit of `(item, size)` to the caller's cart.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Json<Envelope<CartPayload>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(user) = depot.user_uuid() else {
        return Envelope::fail(MISSING_MESSAGE);
    };

    let Ok(body) = req.parse_json::<AddToCartRequest>().await else {
        return Envelope::fail("Invalid request body");
    };

    match state
        .app
        .carts
        .add_item(user, body.item_id.into(), &body.size)
        .await
    {
        Ok(cart_data) => Envelope::ok_with_message("Added To Cart", CartPayload { cart_data }),
        Err(error) => Envelope::fail(failure_message(&error)),
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::{
        carts::{MockCartsService, models::CartData},
        listings::models::ListingUuid,
    };

    use crate::test_helpers::{StateBuilder, TEST_USER_UUID, authed_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            StateBuilder::default().carts(carts).build(),
            Router::with_path("api/cart/add").post(handler),
        )
    }

    #[tokio::test]
    async fn forwards_item_and_size() -> TestResult {
        let listing = ListingUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |user, item, size| {
                *user == TEST_USER_UUID && *item == listing && size == "M"
            })
            .return_once(|_, _, _| Ok(CartData::default()));

        let mut res = TestClient::post("http://example.com/api/cart/add")
            .json(&json!({ "itemId": listing.into_uuid(), "size": "M" }))
            .send(&make_service(carts))
            .await;

        let body: Envelope<CartPayload> = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.message.as_deref(), Some("Added To Cart"));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_never_reaches_the_service() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let mut res = TestClient::post("http://example.com/api/cart/add")
            .json(&json!({ "itemId": "not-a-uuid" }))
            .send(&make_service(carts))
            .await;

        let body: Envelope<CartPayload> = res.take_json().await?;

        assert!(!body.success);

        Ok(())
    }
}
