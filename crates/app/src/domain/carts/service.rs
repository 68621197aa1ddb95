//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        models::{self, CartData},
        store::CartStore,
    },
    listings::models::ListingUuid,
    users::models::UserUuid,
};

#[derive(Clone)]
pub struct StoreCartsService {
    store: Arc<dyn CartStore>,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CartsService for StoreCartsService {
    async fn fetch(&self, user: UserUuid) -> Result<CartData, CartsServiceError> {
        Ok(self.store.load(user).await?)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        listing: ListingUuid,
        size: &str,
    ) -> Result<CartData, CartsServiceError> {
        let mut cart = self.store.load(user).await?;

        models::bump(&mut cart, listing, size);

        self.store.save(user, &cart).await?;

        Ok(cart)
    }

    async fn set_quantity(
        &self,
        user: UserUuid,
        listing: ListingUuid,
        size: &str,
        quantity: u32,
    ) -> Result<CartData, CartsServiceError> {
        let mut cart = self.store.load(user).await?;

        models::set_quantity(&mut cart, listing, size, quantity);

        self.store.save(user, &cart).await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's saved cart; empty when none exists.
    async fn fetch(&self, user: UserUuid) -> Result<CartData, CartsServiceError>;

    /// Add one unit of `(listing, size)` and persist the cart.
    async fn add_item(
        &self,
        user: UserUuid,
        listing: ListingUuid,
        size: &str,
    ) -> Result<CartData, CartsServiceError>;

    /// Set the quantity for `(listing, size)`; zero removes the entry.
    async fn set_quantity(
        &self,
        user: UserUuid,
        listing: ListingUuid,
        size: &str,
        quantity: u32,
    ) -> Result<CartData, CartsServiceError>;
}
