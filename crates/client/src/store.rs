//! Shop state: the explicitly-owned application state object.
//!
//! All mutation goes through the entry points here; there is no ambient
//! global. The catalog mirror, cart and wishlist may run ahead of the
//! server — cart mutations apply locally first and sync best-effort — and
//! are reconciled only by wholesale refresh or optimistic patch.

use std::sync::Arc;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, iso};
use tracing::warn;
use uuid::Uuid;

use crate::{
    api::{ApiError, ShopApi},
    credential::{Credential, CredentialStore},
    models::{Cart, Product, cart_count},
    notify::Notice,
};

const SIZE_REQUIRED_MESSAGE: &str = "Select Product Size";
const LOGIN_TO_SAVE_MESSAGE: &str = "Login to save your cart";
const LOGIN_FOR_WISHLIST_MESSAGE: &str = "Login to use wishlist";

/// Messages the server uses when it refuses a credential. Transport status
/// is always 200, so a stale session is recognized by its envelope message.
const AUTH_FAILURE_MESSAGES: [&str; 2] = [
    "Not Authorized. Please login again",
    "Invalid token. Please login again",
];

fn is_auth_failure(message: &str) -> bool {
    AUTH_FAILURE_MESSAGES.contains(&message)
}

/// Multi-select presentation filter for the collection page. Empty fields
/// match everything.
#[derive(Debug, Clone, Default)]
pub struct CollectionFilter {
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
    pub search: Option<String>,
}

/// Presentation sort. Price ordering is applied here, after retrieval —
/// the server always answers newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    PriceLowHigh,
    PriceHighLow,
}

pub struct ShopState {
    api: Arc<dyn ShopApi>,
    credential_store: Box<dyn CredentialStore>,
    credential: Option<Credential>,
    products: Vec<Product>,
    cart: Cart,
    wishlist: Vec<Uuid>,
    in_flight: FxHashSet<Uuid>,
}

impl ShopState {
    /// Build the state and perform the initial loads: the active catalog,
    /// and — when a structurally valid credential is stored — the user's
    /// cart. A malformed stored credential is discarded on sight.
    pub async fn initialize(
        api: Arc<dyn ShopApi>,
        credential_store: Box<dyn CredentialStore>,
    ) -> Self {
        let mut state = Self {
            api,
            credential_store,
            credential: None,
            products: Vec::new(),
            cart: Cart::default(),
            wishlist: Vec::new(),
            in_flight: FxHashSet::default(),
        };

        if let Some(raw) = state.credential_store.load() {
            match Credential::new(&raw) {
                Ok(credential) => {
                    state.credential = Some(credential);
                    state.sync_cart_from_server().await;
                }
                Err(_) => {
                    warn!("discarding malformed stored credential");

                    state.credential_store.clear();
                }
            }
        }

        state.refresh_products().await;

        state
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn wishlist(&self) -> &[Uuid] {
        &self.wishlist
    }

    pub fn is_logged_in(&self) -> bool {
        self.credential.is_some()
    }

    /// Whether a listing-scoped owner operation is currently in flight.
    pub fn is_in_flight(&self, product: Uuid) -> bool {
        self.in_flight.contains(&product)
    }

    // --- catalog mirror -------------------------------------------------

    /// Re-fetch the active catalog and replace local state wholesale. On
    /// failure the previous in-memory list is kept and returned; this never
    /// errors to the caller and is always safe to retry.
    pub async fn refresh_products(&mut self) -> &[Product] {
        match self.api.fetch_products().await {
            Ok(products) => self.products = products,
            Err(error) => warn!("failed to refresh products, keeping cached list: {error}"),
        }

        &self.products
    }

    /// Idempotent upsert keyed by listing id; new items go to the front.
    pub fn apply_created(&mut self, product: Product) {
        match self.products.iter().position(|entry| entry.id == product.id) {
            Some(position) => self.products[position] = product,
            None => self.products.insert(0, product),
        }
    }

    /// Remove by listing id; absent ids are a no-op.
    pub fn apply_removed(&mut self, product: Uuid) {
        self.products.retain(|entry| entry.id != product);
    }

    /// Replace an existing entry in place; an absent id is a no-op.
    pub fn apply_updated(&mut self, product: Product) {
        if let Some(position) = self.products.iter().position(|entry| entry.id == product.id) {
            self.products[position] = product;
        }
    }

    // --- cart -----------------------------------------------------------

    /// Add one unit of `(item, size)`. The size selection is required; the
    /// local cart is updated before the server is consulted, and a failed
    /// sync keeps the local change and only surfaces a notice.
    pub async fn add_to_cart(&mut self, item: Uuid, size: &str) -> Vec<Notice> {
        if size.is_empty() {
            return vec![Notice::error(SIZE_REQUIRED_MESSAGE)];
        }

        let quantity = self
            .cart
            .entry(item)
            .or_default()
            .entry(size.to_string())
            .or_insert(0);

        *quantity += 1;

        let Some(credential) = self.credential.clone() else {
            return vec![Notice::info(LOGIN_TO_SAVE_MESSAGE)];
        };

        match self.api.add_cart_item(credential.as_str(), item, size).await {
            Ok(()) => {
                // Adopt the server's copy once confirmed.
                self.sync_cart_from_server().await;

                vec![Notice::success("Added To Cart")]
            }
            Err(ApiError::Rejected(message)) => vec![Notice::error(message)],
            Err(error) => {
                warn!("cart add sync failed, keeping local cart: {error}");

                vec![Notice::error("Failed to add to cart")]
            }
        }
    }

    /// Set a `(item, size)` quantity. Zero removes the size entry and, once
    /// no sizes remain, the listing entry. Applied locally first; server
    /// sync is best-effort with no rollback.
    pub async fn update_quantity(&mut self, item: Uuid, size: &str, quantity: u32) -> Vec<Notice> {
        if quantity == 0 {
            if let Some(sizes) = self.cart.get_mut(&item) {
                sizes.remove(size);

                if sizes.is_empty() {
                    self.cart.remove(&item);
                }
            }
        } else {
            self.cart
                .entry(item)
                .or_default()
                .insert(size.to_string(), quantity);
        }

        let Some(credential) = self.credential.clone() else {
            return Vec::new();
        };

        match self
            .api
            .update_cart_item(credential.as_str(), item, size, quantity)
            .await
        {
            Ok(()) => Vec::new(),
            Err(ApiError::Rejected(message)) => vec![Notice::error(message)],
            Err(error) => {
                warn!("cart update sync failed, keeping local cart: {error}");

                vec![Notice::error("Error updating cart")]
            }
        }
    }

    /// Total number of items across all listings and sizes.
    pub fn cart_count(&self) -> u32 {
        cart_count(&self.cart)
    }

    /// Total amount at currently cached prices. A listing missing from the
    /// cache contributes zero — the cache may legitimately be behind.
    pub fn cart_amount(&self) -> Decimal {
        let mut amount = Decimal::ZERO;

        for (item, sizes) in &self.cart {
            let Some(product) = self.products.iter().find(|product| product.id == *item) else {
                continue;
            };

            for quantity in sizes.values() {
                amount += product.price * Decimal::from(*quantity);
            }
        }

        amount
    }

    /// Cart total formatted for display.
    pub fn cart_amount_display(&self) -> String {
        Money::from_decimal(self.cart_amount(), iso::USD).to_string()
    }

    // --- wishlist -------------------------------------------------------

    /// Load the wishlist from the server; silently a no-op when logged out.
    pub async fn fetch_wishlist(&mut self) -> Vec<Notice> {
        let Some(credential) = self.credential.clone() else {
            return Vec::new();
        };

        match self.api.fetch_wishlist(credential.as_str()).await {
            Ok(wishlist) => {
                self.wishlist = wishlist;

                Vec::new()
            }
            Err(error) => {
                warn!("failed to load wishlist: {error}");

                vec![Notice::error("Failed to load wishlist")]
            }
        }
    }

    /// Add a listing to the wishlist. Server-authoritative: the returned
    /// list replaces the local one.
    pub async fn add_to_wishlist(&mut self, product: Uuid) -> Vec<Notice> {
        let Some(credential) = self.credential.clone() else {
            return vec![Notice::info(LOGIN_FOR_WISHLIST_MESSAGE)];
        };

        match self.api.add_wishlist(credential.as_str(), product).await {
            Ok(wishlist) => {
                self.wishlist = wishlist;

                vec![Notice::success("Added to wishlist")]
            }
            Err(ApiError::Rejected(message)) => vec![Notice::error(message)],
            Err(error) => {
                warn!("failed to add to wishlist: {error}");

                vec![Notice::error("Failed to add to wishlist")]
            }
        }
    }

    /// Drop a listing from the wishlist; server-authoritative like add.
    pub async fn remove_from_wishlist(&mut self, product: Uuid) -> Vec<Notice> {
        let Some(credential) = self.credential.clone() else {
            return Vec::new();
        };

        match self.api.remove_wishlist(credential.as_str(), product).await {
            Ok(wishlist) => {
                self.wishlist = wishlist;

                vec![Notice::info("Removed from wishlist")]
            }
            Err(ApiError::Rejected(message)) => vec![Notice::error(message)],
            Err(error) => {
                warn!("failed to remove from wishlist: {error}");

                vec![Notice::error("Failed to remove from wishlist")]
            }
        }
    }

    // --- owner operations ----------------------------------------------

    /// The caller's own listings, inactive ones included. A refused
    /// credential ends the session and asks the UI to route to login.
    pub async fn my_products(&mut self) -> Result<Vec<Product>, Notice> {
        let Some(credential) = self.credential.clone() else {
            return Err(Notice::LoginRequired);
        };

        match self.api.fetch_my_products(credential.as_str()).await {
            Ok(products) => Ok(products),
            Err(ApiError::Rejected(message)) if is_auth_failure(&message) => {
                self.force_logout();

                Err(Notice::LoginRequired)
            }
            Err(ApiError::Rejected(message)) => Err(Notice::error(message)),
            Err(error) => {
                warn!("failed to load own products: {error}");

                Err(Notice::error("Error loading products"))
            }
        }
    }

    /// Nudge a listing's stock by `delta`, clamped at zero. Server-first:
    /// the catalog mirror is patched only after the server confirms. The
    /// operation is guarded per listing id, so a listing's own button can
    /// not be double-submitted while its request is in flight.
    pub async fn adjust_stock(&mut self, product: Uuid, delta: i32) -> Vec<Notice> {
        let Some(current) = self
            .products
            .iter()
            .find(|entry| entry.id == product)
            .map(|entry| entry.stock)
        else {
            return vec![Notice::error("Product not found")];
        };

        let stock = current.saturating_add_signed(delta);

        self.set_stock(product, stock).await
    }

    /// Set a listing's stock to an absolute value; see [`Self::adjust_stock`].
    pub async fn set_stock(&mut self, product: Uuid, stock: u32) -> Vec<Notice> {
        let Some(credential) = self.credential.clone() else {
            return vec![Notice::LoginRequired];
        };

        if !self.in_flight.insert(product) {
            return Vec::new();
        }

        let result = self
            .api
            .update_stock(credential.as_str(), product, stock)
            .await;

        self.in_flight.remove(&product);

        match result {
            Ok(updated) => {
                self.apply_updated(updated);

                vec![Notice::success("Stock updated")]
            }
            Err(ApiError::Rejected(message)) => vec![Notice::error(message)],
            Err(error) => {
                warn!("failed to update stock: {error}");

                vec![Notice::error("Error updating stock")]
            }
        }
    }

    /// Delete one of the caller's listings, then drop it from the mirror.
    /// Guarded per listing id like [`Self::set_stock`].
    pub async fn delete_listing(&mut self, product: Uuid) -> Vec<Notice> {
        let Some(credential) = self.credential.clone() else {
            return vec![Notice::LoginRequired];
        };

        if !self.in_flight.insert(product) {
            return Vec::new();
        }

        let result = self.api.remove_product(credential.as_str(), product).await;

        self.in_flight.remove(&product);

        match result {
            Ok(()) => {
                self.apply_removed(product);

                vec![Notice::success("Product removed successfully")]
            }
            Err(ApiError::Rejected(message)) => vec![Notice::error(message)],
            Err(error) => {
                warn!("failed to delete product: {error}");

                vec![Notice::error("Failed to delete product")]
            }
        }
    }

    // --- credential lifecycle -------------------------------------------

    /// Adopt a fresh credential after login. Structure is validated before
    /// anything is stored; adoption triggers a cart fetch.
    pub async fn login(&mut self, raw: &str) -> Vec<Notice> {
        let Ok(credential) = Credential::new(raw) else {
            return vec![Notice::error("Invalid authentication token")];
        };

        self.credential_store.persist(credential.as_str());
        self.credential = Some(credential);

        self.sync_cart_from_server().await;
        self.fetch_wishlist().await;

        Vec::new()
    }

    /// End the session: reset cart and wishlist, clear persisted storage.
    pub fn logout(&mut self) -> Vec<Notice> {
        self.force_logout();

        vec![Notice::info("Logged out successfully"), Notice::LoginRequired]
    }

    fn force_logout(&mut self) {
        self.credential = None;
        self.cart.clear();
        self.wishlist.clear();
        self.credential_store.clear();
    }

    async fn sync_cart_from_server(&mut self) {
        let Some(credential) = self.credential.clone() else {
            return;
        };

        match self.api.fetch_cart(credential.as_str()).await {
            Ok(cart) => self.cart = cart,
            Err(ApiError::Rejected(message)) if is_auth_failure(&message) => {
                self.force_logout();
            }
            Err(error) => warn!("failed to load cart, keeping local copy: {error}"),
        }
    }

    // --- presentation ---------------------------------------------------

    /// The collection view: filter and sort applied to the cached catalog.
    /// Products arrive newest-first; price ordering is purely local.
    pub fn collection(&self, filter: &CollectionFilter, sort: SortOrder) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|product| {
                filter.search.as_deref().is_none_or(|search| {
                    product.name.to_lowercase().contains(&search.to_lowercase())
                })
            })
            .filter(|product| {
                filter.categories.is_empty() || filter.categories.contains(&product.category)
            })
            .filter(|product| {
                filter.sub_categories.is_empty()
                    || filter.sub_categories.contains(&product.sub_category)
            })
            .cloned()
            .collect();

        match sort {
            SortOrder::Newest => {}
            SortOrder::PriceLowHigh => products.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHighLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        products
    }
}
