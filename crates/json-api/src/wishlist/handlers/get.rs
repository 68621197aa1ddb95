//! Get Wishlist Handler

use salvo::prelude::*;

use crate::{
    auth::middleware::MISSING_MESSAGE,
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
    wishlist::{WishlistPayload, errors::failure_message},
};

/// The caller's wishlist.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Json<Envelope<WishlistPayload>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(user) = depot.user_uuid() else {
        return Envelope::fail(MISSING_MESSAGE);
    };

    match state.app.wishlists.fetch(user).await {
        Ok(listings) => Envelope::ok(WishlistPayload::new(listings)),
        Err(error) => Envelope::fail(failure_message(&error)),
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::{listings::models::ListingUuid, wishlists::MockWishlistsService};

    use crate::test_helpers::{StateBuilder, TEST_USER_UUID, authed_service};

    use super::*;

    fn make_service(wishlists: MockWishlistsService) -> Service {
        authed_service(
            StateBuilder::default().wishlists(wishlists).build(),
            Router::with_path("api/user/wishlist/get").post(handler),
        )
    }

    #[tokio::test]
    async fn returns_the_callers_wishlist() -> TestResult {
        let listing = ListingUuid::new();

        let mut wishlists = MockWishlistsService::new();

        wishlists
            .expect_fetch()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![listing]));

        let mut res = TestClient::post("http://example.com/api/user/wishlist/get")
            .send(&make_service(wishlists))
            .await;

        let body: Envelope<WishlistPayload> = res.take_json().await?;

        assert!(body.success);
        assert_eq!(
            body.data.expect("wishlist present").wishlist,
            vec![listing.into_uuid()]
        );

        Ok(())
    }
}
