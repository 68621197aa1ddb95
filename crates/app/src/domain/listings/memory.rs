//! In-memory catalog store.

use std::sync::RwLock;

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use crate::{
    database::StoreError,
    domain::listings::{
        models::{Listing, ListingUuid},
        store::{CatalogStore, ListingFilter},
    },
};

/// Document map with the same contract as the PostgreSQL store: the linear
/// predicate scan reference implementation, used by service tests and local
/// development.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    documents: RwLock<FxHashMap<ListingUuid, Listing>>,
}

impl MemoryCatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(listing: &Listing, filter: &ListingFilter) -> bool {
    filter.status.is_none_or(|status| listing.status == status)
        && filter.seller.is_none_or(|seller| listing.seller == seller)
        && filter
            .category
            .as_deref()
            .is_none_or(|category| listing.category == category)
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn insert(&self, listing: &Listing) -> Result<(), StoreError> {
        let mut documents = self.documents.write().unwrap_or_else(|e| e.into_inner());

        documents.insert(listing.uuid, listing.clone());

        Ok(())
    }

    async fn fetch(&self, uuid: ListingUuid) -> Result<Option<Listing>, StoreError> {
        let documents = self.documents.read().unwrap_or_else(|e| e.into_inner());

        Ok(documents.get(&uuid).cloned())
    }

    async fn replace(&self, listing: &Listing) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().unwrap_or_else(|e| e.into_inner());

        if !documents.contains_key(&listing.uuid) {
            return Ok(false);
        }

        documents.insert(listing.uuid, listing.clone());

        Ok(true)
    }

    async fn remove(&self, uuid: ListingUuid) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().unwrap_or_else(|e| e.into_inner());

        Ok(documents.remove(&uuid).is_some())
    }

    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        let documents = self.documents.read().unwrap_or_else(|e| e.into_inner());

        Ok(documents
            .values()
            .filter(|listing| matches(listing, filter))
            .cloned()
            .collect())
    }
}
