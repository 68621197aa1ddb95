//! My Products Handler

use salvo::prelude::*;

use crate::{
    auth::middleware::MISSING_MESSAGE,
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
    products::{ProductsData, errors::failure_message},
};

/// Everything the caller owns, inactive listings included.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Json<Envelope<ProductsData>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(user) = depot.user_uuid() else {
        return Envelope::fail(MISSING_MESSAGE);
    };

    match state.app.catalog.list_by_owner(user).await {
        Ok(listings) => Envelope::ok(ProductsData {
            products: listings.into_iter().map(Into::into).collect(),
        }),
        Err(error) => Envelope::fail(failure_message(&error, INTERNAL_MESSAGE)),
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::listings::{
        MockCatalogService,
        models::{ListingStatus, ListingUuid},
    };

    use crate::test_helpers::{TEST_USER_UUID, authed_service, make_listing, state_with_catalog};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        authed_service(
            state_with_catalog(catalog),
            Router::with_path("api/product/my-products").get(handler),
        )
    }

    #[tokio::test]
    async fn returns_the_callers_listings_including_inactive() -> TestResult {
        let uuid = ListingUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_by_owner()
            .once()
            .withf(|owner| *owner == TEST_USER_UUID)
            .return_once(move |owner| {
                let mut listing = make_listing(uuid, owner);

                listing.status = ListingStatus::Inactive;

                Ok(vec![listing])
            });

        let mut res = TestClient::get("http://example.com/api/product/my-products")
            .send(&make_service(catalog))
            .await;

        let body: Envelope<ProductsData> = res.take_json().await?;
        let data = body.data.expect("products present");

        assert!(body.success);
        assert_eq!(data.products.len(), 1);
        assert_eq!(data.products[0].status, "inactive");
        assert!(data.products[0].seller.is_none(), "owner view skips profiles");

        Ok(())
    }
}
