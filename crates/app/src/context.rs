//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, RemoteVerifier, VerifierAuthService},
    database,
    domain::{
        carts::{CartsService, PgCartStore, StoreCartsService},
        listings::{CatalogService, PgCatalogStore, StoreCatalogService},
        users::PgUserDirectory,
        wishlists::{PgWishlistStore, StoreWishlistsService, WishlistsService},
    },
    media::{HostedMediaClient, MediaGateway},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub auth: Arc<dyn AuthService>,
    pub media: Arc<dyn MediaGateway>,
}

impl AppContext {
    /// Build application context from a database URL and external clients.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// the schema fails.
    pub async fn from_database_url(
        url: &str,
        verifier: RemoteVerifier,
        media: HostedMediaClient,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url).await.map_err(AppInitError::Database)?;

        database::ensure_schema(&pool)
            .await
            .map_err(AppInitError::Database)?;

        let store = Arc::new(PgCatalogStore::new(pool.clone()));
        let users = Arc::new(PgUserDirectory::new(pool.clone()));
        let carts = Arc::new(PgCartStore::new(pool.clone()));
        let wishlists = Arc::new(PgWishlistStore::new(pool));

        Ok(Self {
            catalog: Arc::new(StoreCatalogService::new(store, users)),
            carts: Arc::new(StoreCartsService::new(carts)),
            wishlists: Arc::new(StoreWishlistsService::new(wishlists)),
            auth: Arc::new(VerifierAuthService::new(Arc::new(verifier))),
            media: Arc::new(media),
        })
    }
}
