//! Client-side catalog cache for the Bazaar marketplace.
//!
//! Maintains an eventually-consistent in-memory mirror of the active catalog
//! plus the current user's cart and wishlist, so a UI can render without a
//! round trip on every interaction. Local cart mutations are optimistic:
//! they are applied in memory first, then mirrored to the server when a
//! credential is present. A failed sync surfaces a [`Notice`], never a
//! rollback — local state is allowed to be ahead of the server, and is
//! reconciled by explicit refresh or optimistic patch only.

mod api;
mod credential;
mod models;
mod notify;
mod store;

pub use api::{ApiError, HttpShopApi, MockShopApi, ShopApi, ShopApiConfig};
pub use credential::{
    Credential, CredentialFormatError, CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
pub use models::{Cart, NewProductForm, Product, RawImage, Seller, cart_count};
pub use notify::Notice;
pub use store::{CollectionFilter, ShopState, SortOrder};
