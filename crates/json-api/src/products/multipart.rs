//! Multipart field coercion and image uploads.
//!
//! Create and update share the same four optional image slots and the same
//! field coercions: `price` as a non-negative decimal, `stock` as a
//! non-negative integer (independent of price), `sizes` as a JSON string
//! array, `bestseller` as the literal `"true"`.

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::Request;
use tokio::task::JoinSet;
use tracing::error;

use bazaar_app::{
    domain::listings::{
        ValidationError,
        models::{Condition, Sizes},
    },
    media::MediaGateway,
};

pub(crate) const IMAGE_SLOTS: [&str; 4] = ["image1", "image2", "image3", "image4"];

pub(crate) const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload images";

/// A file pulled out of one of the named image slots.
pub(crate) struct RawImage {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Read every populated image slot into memory.
pub(crate) async fn collect_images(req: &mut Request) -> Result<Vec<RawImage>, std::io::Error> {
    let mut images = Vec::new();

    for slot in IMAGE_SLOTS {
        let Some(file) = req.file(slot).await else {
            continue;
        };

        let filename = file.name().unwrap_or("upload").to_string();
        let bytes = tokio::fs::read(file.path()).await?;

        images.push(RawImage { bytes, filename });
    }

    Ok(images)
}

/// Upload all images as independent concurrent tasks. Either every upload
/// succeeds and the full URL set comes back in slot order, or the whole
/// operation is abandoned — no partial image set survives.
pub(crate) async fn upload_images(
    media: &Arc<dyn MediaGateway>,
    images: Vec<RawImage>,
) -> Option<Vec<String>> {
    let mut uploads = JoinSet::new();
    let count = images.len();

    for (index, image) in images.into_iter().enumerate() {
        let media = Arc::clone(media);

        uploads.spawn(async move { (index, media.upload(image.bytes, &image.filename).await) });
    }

    let mut urls: Vec<Option<String>> = vec![None; count];

    while let Some(joined) = uploads.join_next().await {
        match joined {
            Ok((index, Ok(url))) => urls[index] = Some(url),
            Ok((_, Err(source))) => {
                error!("image upload failed: {source}");

                return None;
            }
            Err(source) => {
                error!("image upload task failed: {source}");

                return None;
            }
        }
    }

    urls.into_iter().collect()
}

pub(crate) fn parse_price(text: &str) -> Result<Decimal, ValidationError> {
    text.trim()
        .parse::<Decimal>()
        .map_err(|_| ValidationError::NegativePrice)
}

pub(crate) fn parse_stock(text: &str) -> Result<u32, ValidationError> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidStock)
}

pub(crate) fn parse_sizes(text: &str) -> Result<Sizes, ValidationError> {
    let sizes: Vec<String> =
        serde_json::from_str(text).map_err(|_| ValidationError::MalformedSizes)?;

    Ok(sizes.into_iter().collect())
}

pub(crate) fn parse_condition(text: &str) -> Result<Condition, ValidationError> {
    text.parse::<Condition>()
        .map_err(|_| ValidationError::UnknownCondition)
}

pub(crate) fn parse_bestseller(text: &str) -> bool {
    text == "true"
}
