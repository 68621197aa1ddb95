//! Product wire models.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::listings::models::{CatalogEntry, Listing};

/// Seller public profile as serialized next to a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SellerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A listing as serialized on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub sub_category: String,
    pub condition: String,
    pub sizes: Vec<String>,
    pub bestseller: bool,
    pub stock: u32,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerResponse>,
    pub status: String,
    pub created_at: Timestamp,
}

impl From<Listing> for ProductResponse {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.uuid.into_uuid(),
            name: listing.name,
            description: listing.description,
            price: listing.price,
            category: listing.category,
            sub_category: listing.sub_category,
            condition: listing.condition.as_str().to_string(),
            sizes: listing.sizes.into_vec(),
            bestseller: listing.bestseller,
            stock: listing.stock,
            images: listing.images,
            seller: None,
            status: listing.status.as_str().to_string(),
            created_at: listing.created_at,
        }
    }
}

impl From<CatalogEntry> for ProductResponse {
    fn from(entry: CatalogEntry) -> Self {
        let mut response = Self::from(entry.listing);

        response.seller = entry.seller.map(|profile| SellerResponse {
            id: profile.uuid.into_uuid(),
            name: profile.name,
            email: profile.email,
        });

        response
    }
}

/// `{products: [...]}` payload shared by the collection routes.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductsData {
    pub products: Vec<ProductResponse>,
}

/// `{product: {...}}` payload shared by the single-listing routes.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductData {
    pub product: ProductResponse,
}
