//! Add Product Handler

use salvo::prelude::*;
use tracing::{error, info};

use bazaar_app::domain::listings::{ValidationError, models::NewListing};

use crate::{
    auth::middleware::MISSING_MESSAGE,
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
    products::{
        ProductData,
        errors::failure_message,
        multipart::{
            UPLOAD_FAILED_MESSAGE, collect_images, parse_bestseller, parse_condition, parse_price,
            parse_sizes, upload_images,
        },
    },
};

/// Create a listing from a multipart form. The caller becomes the seller no
/// matter what the payload claims; images are uploaded first and all of them
/// must succeed before anything is persisted.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Json<Envelope<ProductData>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(user) = depot.user_uuid() else {
        return Envelope::fail(MISSING_MESSAGE);
    };

    let name = req.form::<String>("name").await.unwrap_or_default();
    let description = req.form::<String>("description").await.unwrap_or_default();
    let category = req.form::<String>("category").await.unwrap_or_default();
    let sub_category = req.form::<String>("subCategory").await.unwrap_or_default();

    let price = match req.form::<String>("price").await.as_deref().map(parse_price) {
        Some(Ok(price)) => price,
        Some(Err(error)) => return Envelope::fail(error.to_string()),
        None => return Envelope::fail(ValidationError::NegativePrice.to_string()),
    };

    let sizes = match req.form::<String>("sizes").await.as_deref().map(parse_sizes) {
        Some(Ok(sizes)) => sizes,
        Some(Err(error)) => return Envelope::fail(error.to_string()),
        None => Default::default(),
    };

    let condition = match req
        .form::<String>("condition")
        .await
        .as_deref()
        .map(parse_condition)
    {
        Some(Ok(condition)) => Some(condition),
        Some(Err(error)) => return Envelope::fail(error.to_string()),
        None => None,
    };

    let bestseller = req
        .form::<String>("bestseller")
        .await
        .as_deref()
        .is_some_and(parse_bestseller);

    let raw_images = match collect_images(req).await {
        Ok(raw_images) => raw_images,
        Err(source) => {
            error!("failed to read uploaded files: {source}");

            return Envelope::fail(INTERNAL_MESSAGE);
        }
    };

    if raw_images.is_empty() {
        return Envelope::fail(ValidationError::NoImages.to_string());
    }

    let Some(images) = upload_images(&state.app.media, raw_images).await else {
        return Envelope::fail(UPLOAD_FAILED_MESSAGE);
    };

    let draft = NewListing {
        name,
        description,
        price,
        category,
        sub_category,
        condition,
        sizes,
        bestseller,
        stock: None,
        images,
    };

    match state.app.catalog.create(user, draft).await {
        Ok(listing) => {
            info!(listing_uuid = %listing.uuid, "listing created");

            Envelope::ok_with_message(
                "Product Added Successfully",
                ProductData {
                    product: listing.into(),
                },
            )
        }
        Err(error) => Envelope::fail(failure_message(&error, INTERNAL_MESSAGE)),
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use bazaar_app::{
        domain::listings::{MockCatalogService, models::ListingUuid},
        media::MockMediaGateway,
    };

    use crate::test_helpers::{
        StateBuilder, TEST_USER_UUID, authed_service, make_listing, multipart_body,
    };

    use super::*;

    fn make_service(catalog: MockCatalogService, media: MockMediaGateway) -> Service {
        authed_service(
            StateBuilder::default().catalog(catalog).media(media).build(),
            Router::with_path("api/product/add").post(handler),
        )
    }

    const FIELDS: &[(&str, &str)] = &[
        ("name", "Desk Lamp"),
        ("description", "Warm light, small dent"),
        ("price", "15"),
        ("category", "Home & Garden"),
        ("subCategory", "Decor"),
        ("sizes", r#"["One Size"]"#),
        ("condition", "Good"),
        ("bestseller", "false"),
        // A forged seller field must be ignored entirely.
        ("seller", "11111111-1111-1111-1111-111111111111"),
    ];

    #[tokio::test]
    async fn creates_a_listing_owned_by_the_caller() -> TestResult {
        let uuid = ListingUuid::new();

        let mut media = MockMediaGateway::new();

        media
            .expect_upload()
            .once()
            .withf(|bytes, filename| bytes == b"jpegdata" && filename == "lamp.jpg")
            .return_once(|_, _| Ok("https://img.example/hosted.jpg".to_string()));

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create()
            .once()
            .withf(move |requester, draft| {
                *requester == TEST_USER_UUID
                    && draft.name == "Desk Lamp"
                    && draft.images == vec!["https://img.example/hosted.jpg".to_string()]
                    && draft.sizes.as_slice() == ["One Size"]
            })
            .return_once(move |requester, _| Ok(make_listing(uuid, requester)));

        let (content_type, body) = multipart_body(FIELDS, &[("image1", "lamp.jpg", b"jpegdata")]);

        let mut res = TestClient::post("http://example.com/api/product/add")
            .add_header(CONTENT_TYPE, content_type, true)
            .bytes(body)
            .send(&make_service(catalog, media))
            .await;

        let envelope: Envelope<ProductData> = res.take_json().await?;

        assert!(envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Product Added Successfully"));
        assert_eq!(
            envelope.data.expect("product present").product.id,
            uuid.into_uuid()
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_images_fail_before_any_upload() -> TestResult {
        let mut media = MockMediaGateway::new();

        media.expect_upload().never();

        let mut catalog = MockCatalogService::new();

        catalog.expect_create().never();

        let (content_type, body) = multipart_body(FIELDS, &[]);

        let mut res = TestClient::post("http://example.com/api/product/add")
            .add_header(CONTENT_TYPE, content_type, true)
            .bytes(body)
            .send(&make_service(catalog, media))
            .await;

        let envelope: Envelope<ProductData> = res.take_json().await?;

        assert!(!envelope.success);
        assert_eq!(
            envelope.message.as_deref(),
            Some("at least one image is required")
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_upload_aborts_the_create() -> TestResult {
        use bazaar_app::media::MediaGatewayError;

        let mut media = MockMediaGateway::new();

        media.expect_upload().once().return_once(|_, _| {
            Err(MediaGatewayError::UnexpectedResponse(
                "upload exploded".to_string(),
            ))
        });

        let mut catalog = MockCatalogService::new();

        catalog.expect_create().never();

        let (content_type, body) = multipart_body(FIELDS, &[("image1", "lamp.jpg", b"jpegdata")]);

        let mut res = TestClient::post("http://example.com/api/product/add")
            .add_header(CONTENT_TYPE, content_type, true)
            .bytes(body)
            .send(&make_service(catalog, media))
            .await;

        let envelope: Envelope<ProductData> = res.take_json().await?;

        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some(UPLOAD_FAILED_MESSAGE));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_sizes_are_rejected() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create().never();

        let (content_type, body) = multipart_body(
            &[("price", "15"), ("sizes", "not-json")],
            &[("image1", "lamp.jpg", b"jpegdata")],
        );

        let mut res = TestClient::post("http://example.com/api/product/add")
            .add_header(CONTENT_TYPE, content_type, true)
            .bytes(body)
            .send(&make_service(catalog, MockMediaGateway::new()))
            .await;

        let envelope: Envelope<ProductData> = res.take_json().await?;

        assert!(!envelope.success);
        assert_eq!(
            envelope.message.as_deref(),
            Some("sizes must be a sequence of strings")
        );

        Ok(())
    }
}
