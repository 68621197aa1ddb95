//! Catalog store contract.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::StoreError,
    domain::{
        listings::models::{Listing, ListingStatus, ListingUuid},
        users::models::UserUuid,
    },
};

/// Equality filter for [`CatalogStore::find`]. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub status: Option<ListingStatus>,
    pub seller: Option<UserUuid>,
    pub category: Option<String>,
}

impl ListingFilter {
    /// Publicly visible listings.
    #[must_use]
    pub fn active() -> Self {
        Self {
            status: Some(ListingStatus::Active),
            ..Self::default()
        }
    }

    /// Everything a seller owns, regardless of status.
    #[must_use]
    pub fn owned_by(seller: UserUuid) -> Self {
        Self {
            seller: Some(seller),
            ..Self::default()
        }
    }

    /// Publicly visible listings within one category.
    #[must_use]
    pub fn active_in_category(category: impl Into<String>) -> Self {
        Self {
            status: Some(ListingStatus::Active),
            category: Some(category.into()),
            ..Self::default()
        }
    }
}

/// The authoritative listing collection.
///
/// Document-store shaped: every operation touches exactly one document and
/// is atomic on its own. `replace` is a wholesale last-write-wins swap; no
/// conflict detection is offered or expected. Result order from `find` is
/// unspecified; the service sorts.
#[automock]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Persist a new listing document.
    async fn insert(&self, listing: &Listing) -> Result<(), StoreError>;

    /// Fetch one document by id.
    async fn fetch(&self, uuid: ListingUuid) -> Result<Option<Listing>, StoreError>;

    /// Replace a document wholesale. Returns `false` when the id is absent.
    async fn replace(&self, listing: &Listing) -> Result<bool, StoreError>;

    /// Hard-delete a document. Returns `false` when the id is absent.
    async fn remove(&self, uuid: ListingUuid) -> Result<bool, StoreError>;

    /// All documents matching the filter.
    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError>;
}
