//! Listing Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    domain::users::models::{SellerProfile, UserUuid},
    uuids::TypedUuid,
};

/// Listing UUID
pub type ListingUuid = TypedUuid<Listing>;

/// Ordered free-form size labels; most listings carry a handful at most.
pub type Sizes = SmallVec<[String; 4]>;

/// A single catalog entry: one second-hand item offered for sale.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub uuid: ListingUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub sub_category: String,
    pub condition: Condition,
    pub sizes: Sizes,
    pub bestseller: bool,
    /// Informational seller-managed counter; never reserved or decremented
    /// by any flow in this system.
    pub stock: u32,
    /// Always at least one URL.
    pub images: Vec<String>,
    /// Set once at creation from the authenticated requester; immutable.
    pub seller: UserUuid,
    pub status: ListingStatus,
    pub created_at: Timestamp,
}

/// Draft submitted to create a listing. The seller, status and creation
/// timestamp are assigned by the service, never taken from the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub sub_category: String,
    pub condition: Option<Condition>,
    pub sizes: Sizes,
    pub bestseller: bool,
    pub stock: Option<u32>,
    pub images: Vec<String>,
}

/// Partial update: a field is applied exactly when it is `Some`, so an empty
/// string or zero is a value, not an omission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub condition: Option<Condition>,
    pub sizes: Option<Sizes>,
    pub bestseller: Option<bool>,
    pub stock: Option<u32>,
    pub status: Option<ListingStatus>,
    /// Wholesale replacement image set; must be non-empty when present.
    pub images: Option<Vec<String>>,
}

/// A listing paired with its seller's resolved public profile. `None` when
/// the user record is no longer present in the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub listing: Listing,
    pub seller: Option<SellerProfile>,
}

/// Physical condition of a second-hand item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::LikeNew => "Like New",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown condition label")]
pub struct ParseConditionError;

impl FromStr for Condition {
    type Err = ParseConditionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "New" => Ok(Self::New),
            "Like New" => Ok(Self::LikeNew),
            "Good" => Ok(Self::Good),
            "Fair" => Ok(Self::Fair),
            "Poor" => Ok(Self::Poor),
            _ => Err(ParseConditionError),
        }
    }
}

/// Visibility flag: inactive listings are excluded from public browse and
/// search but stay fetchable by id and visible to their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Inactive,
}

impl ListingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown status label")]
pub struct ParseStatusError;

impl FromStr for ListingStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseStatusError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_labels_round_trip() {
        for condition in [
            Condition::New,
            Condition::LikeNew,
            Condition::Good,
            Condition::Fair,
            Condition::Poor,
        ] {
            let parsed: Condition = condition.as_str().parse().expect("label should parse");

            assert_eq!(parsed, condition);
        }
    }

    #[test]
    fn condition_rejects_unknown_label() {
        assert!("Mint".parse::<Condition>().is_err());
    }

    #[test]
    fn status_labels_round_trip() {
        for status in [ListingStatus::Active, ListingStatus::Inactive] {
            let parsed: ListingStatus = status.as_str().parse().expect("label should parse");

            assert_eq!(parsed, status);
        }
    }
}
