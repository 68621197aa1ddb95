//! Cart store contract.

use std::sync::RwLock;

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{PgPool, Row, query, types::Json};

use crate::{
    database::StoreError,
    domain::{carts::models::CartData, users::models::UserUuid},
};

const FETCH_CART_SQL: &str = include_str!("sql/fetch_cart.sql");
const UPSERT_CART_SQL: &str = include_str!("sql/upsert_cart.sql");

/// One cart document per user. A user with no saved cart loads as empty.
#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn load(&self, user: UserUuid) -> Result<CartData, StoreError>;

    async fn save(&self, user: UserUuid, cart: &CartData) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

impl PgCartStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn load(&self, user: UserUuid) -> Result<CartData, StoreError> {
        let row = query(FETCH_CART_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;

        match row {
            Some(row) => Ok(row.try_get::<Json<CartData>, _>("data").map_err(StoreError::from)?.0),
            None => Ok(CartData::default()),
        }
    }

    async fn save(&self, user: UserUuid, cart: &CartData) -> Result<(), StoreError> {
        query(UPSERT_CART_SQL)
            .bind(user.into_uuid())
            .bind(Json(cart))
            .bind(SqlxTimestamp::from(Timestamp::now()))
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}

/// In-memory cart store for service tests and local development.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    carts: RwLock<FxHashMap<UserUuid, CartData>>,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn load(&self, user: UserUuid) -> Result<CartData, StoreError> {
        let carts = self.carts.read().unwrap_or_else(|e| e.into_inner());

        Ok(carts.get(&user).cloned().unwrap_or_default())
    }

    async fn save(&self, user: UserUuid, cart: &CartData) -> Result<(), StoreError> {
        let mut carts = self.carts.write().unwrap_or_else(|e| e.into_inner());

        carts.insert(user, cart.clone());

        Ok(())
    }
}
