//! Wishlist store contract.

use std::sync::RwLock;

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{PgPool, Row, query};
use uuid::Uuid;

use crate::{
    database::StoreError,
    domain::{listings::models::ListingUuid, users::models::UserUuid},
};

const FETCH_WISHLIST_SQL: &str = include_str!("sql/fetch_wishlist.sql");
const UPSERT_WISHLIST_SQL: &str = include_str!("sql/upsert_wishlist.sql");

/// One ordered wishlist document per user.
#[automock]
#[async_trait]
pub trait WishlistStore: Send + Sync {
    async fn load(&self, user: UserUuid) -> Result<Vec<ListingUuid>, StoreError>;

    async fn save(&self, user: UserUuid, listings: &[ListingUuid]) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgWishlistStore {
    pool: PgPool,
}

impl PgWishlistStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WishlistStore for PgWishlistStore {
    async fn load(&self, user: UserUuid) -> Result<Vec<ListingUuid>, StoreError> {
        let row = query(FETCH_WISHLIST_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;

        match row {
            Some(row) => {
                let uuids: Vec<Uuid> = row.try_get("listing_uuids").map_err(StoreError::from)?;

                Ok(uuids.into_iter().map(ListingUuid::from_uuid).collect())
            }
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, user: UserUuid, listings: &[ListingUuid]) -> Result<(), StoreError> {
        let uuids: Vec<Uuid> = listings.iter().copied().map(ListingUuid::into_uuid).collect();

        query(UPSERT_WISHLIST_SQL)
            .bind(user.into_uuid())
            .bind(&uuids)
            .bind(SqlxTimestamp::from(Timestamp::now()))
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}

/// In-memory wishlist store for service tests and local development.
#[derive(Debug, Default)]
pub struct MemoryWishlistStore {
    wishlists: RwLock<FxHashMap<UserUuid, Vec<ListingUuid>>>,
}

impl MemoryWishlistStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WishlistStore for MemoryWishlistStore {
    async fn load(&self, user: UserUuid) -> Result<Vec<ListingUuid>, StoreError> {
        let wishlists = self.wishlists.read().unwrap_or_else(|e| e.into_inner());

        Ok(wishlists.get(&user).cloned().unwrap_or_default())
    }

    async fn save(&self, user: UserUuid, listings: &[ListingUuid]) -> Result<(), StoreError> {
        let mut wishlists = self.wishlists.write().unwrap_or_else(|e| e.into_inner());

        wishlists.insert(user, listings.to_vec());

        Ok(())
    }
}
