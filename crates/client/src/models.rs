//! Wire models mirrored from the API.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seller public profile attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A catalog listing as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<Seller>,
    pub status: String,
    pub created_at: Timestamp,
}

/// Cart shape shared with the server: listing id to per-size quantities.
pub type Cart = FxHashMap<Uuid, FxHashMap<String, u32>>;

/// Total number of items across all listings and sizes.
#[must_use]
pub fn cart_count(cart: &Cart) -> u32 {
    cart.values().flat_map(|sizes| sizes.values()).copied().sum()
}

/// One image file attached to a listing submission.
#[derive(Debug, Clone)]
pub struct RawImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Fields for a new listing submission. The seller is never part of the
/// form; the server derives it from the credential.
#[derive(Debug, Clone)]
pub struct NewProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub sub_category: String,
    pub condition: Option<String>,
    pub sizes: Vec<String>,
    pub bestseller: bool,
    /// Up to four images; the server requires at least one.
    pub images: Vec<RawImage>,
}
