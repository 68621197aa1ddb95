//! Wishlists service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    listings::models::ListingUuid,
    users::models::UserUuid,
    wishlists::{errors::WishlistsServiceError, store::WishlistStore},
};

#[derive(Clone)]
pub struct StoreWishlistsService {
    store: Arc<dyn WishlistStore>,
}

impl StoreWishlistsService {
    #[must_use]
    pub fn new(store: Arc<dyn WishlistStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WishlistsService for StoreWishlistsService {
    async fn fetch(&self, user: UserUuid) -> Result<Vec<ListingUuid>, WishlistsServiceError> {
        Ok(self.store.load(user).await?)
    }

    async fn add(
        &self,
        user: UserUuid,
        listing: ListingUuid,
    ) -> Result<Vec<ListingUuid>, WishlistsServiceError> {
        let mut wishlist = self.store.load(user).await?;

        if !wishlist.contains(&listing) {
            wishlist.push(listing);
            self.store.save(user, &wishlist).await?;
        }

        Ok(wishlist)
    }

    async fn remove(
        &self,
        user: UserUuid,
        listing: ListingUuid,
    ) -> Result<Vec<ListingUuid>, WishlistsServiceError> {
        let mut wishlist = self.store.load(user).await?;

        if let Some(position) = wishlist.iter().position(|entry| *entry == listing) {
            wishlist.remove(position);
            self.store.save(user, &wishlist).await?;
        }

        Ok(wishlist)
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// The user's wishlist; empty when none exists.
    async fn fetch(&self, user: UserUuid) -> Result<Vec<ListingUuid>, WishlistsServiceError>;

    /// Append a listing (idempotent) and return the updated list.
    async fn add(
        &self,
        user: UserUuid,
        listing: ListingUuid,
    ) -> Result<Vec<ListingUuid>, WishlistsServiceError>;

    /// Drop a listing and return the updated list.
    async fn remove(
        &self,
        user: UserUuid,
        listing: ListingUuid,
    ) -> Result<Vec<ListingUuid>, WishlistsServiceError>;
}
