//! Update Product Handler

use salvo::prelude::*;
use tracing::{error, info};
use uuid::Uuid;

use bazaar_app::domain::listings::models::ListingPatch;

use crate::{
    auth::middleware::MISSING_MESSAGE,
    envelope::{Envelope, INTERNAL_MESSAGE},
    extensions::*,
    products::{
        ProductData,
        errors::{UPDATE_FORBIDDEN_MESSAGE, failure_message},
        multipart::{
            UPLOAD_FAILED_MESSAGE, collect_images, parse_bestseller, parse_condition, parse_price,
            parse_sizes, parse_stock, upload_images,
        },
    },
};

/// Partial update of an owned listing. A field is applied exactly when it
/// appears in the form — an empty string is a value, not an omission — and
/// the image set is replaced wholesale only when at least one new image is
/// uploaded.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Json<Envelope<ProductData>> {
    let Some(state) = depot.shared_state() else {
        return Envelope::fail(INTERNAL_MESSAGE);
    };

    let Some(user) = depot.user_uuid() else {
        return Envelope::fail(MISSING_MESSAGE);
    };

    let Some(id) = req.form::<Uuid>("id").await else {
        return Envelope::fail("Invalid request body");
    };

    let mut patch = ListingPatch {
        name: req.form::<String>("name").await,
        description: req.form::<String>("description").await,
        category: req.form::<String>("category").await,
        sub_category: req.form::<String>("subCategory").await,
        ..ListingPatch::default()
    };

    match req.form::<String>("price").await.as_deref().map(parse_price) {
        Some(Ok(price)) => patch.price = Some(price),
        Some(Err(error)) => return Envelope::fail(error.to_string()),
        None => {}
    }

    match req.form::<String>("stock").await.as_deref().map(parse_stock) {
        Some(Ok(stock)) => patch.stock = Some(stock),
        Some(Err(error)) => return Envelope::fail(error.to_string()),
        None => {}
    }

    match req.form::<String>("sizes").await.as_deref().map(parse_sizes) {
        Some(Ok(sizes)) => patch.sizes = Some(sizes),
        Some(Err(error)) => return Envelope::fail(error.to_string()),
        None => {}
    }

    match req
        .form::<String>("condition")
        .await
        .as_deref()
        .map(parse_condition)
    {
        Some(Ok(condition)) => patch.condition = Some(condition),
        Some(Err(error)) => return Envelope::fail(error.to_string()),
        None => {}
    }

    match req.form::<String>("status").await.as_deref() {
        Some(status) => match status.parse() {
            Ok(status) => patch.status = Some(status),
            Err(_) => return Envelope::fail("unknown status label"),
        },
        None => {}
    }

    if let Some(text) = req.form::<String>("bestseller").await {
        patch.bestseller = Some(parse_bestseller(&text));
    }

    let raw_images = match collect_images(req).await {
        Ok(raw_images) => raw_images,
        Err(source) => {
            error!("failed to read uploaded files: {source}");

            return Envelope::fail(INTERNAL_MESSAGE);
        }
    };

    if !raw_images.is_empty() {
        let Some(images) = upload_images(&state.app.media, raw_images).await else {
            return Envelope::fail(UPLOAD_FAILED_MESSAGE);
        };

        patch.images = Some(images);
    }

    match state.app.catalog.update(user, id.into(), patch).await {
        Ok(listing) => {
            info!(listing_uuid = %listing.uuid, "listing updated");

            Envelope::ok_with_message(
                "Product updated successfully",
                ProductData {
                    product: listing.into(),
                },
            )
        }
        Err(error) => Envelope::fail(failure_message(&error, UPDATE_FORBIDDEN_MESSAGE)),
    }
}
