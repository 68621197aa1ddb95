//! HTTP client for the Bazaar REST API.
//!
//! Every route answers `200 OK` with a `{success, message?, ...}` envelope,
//! so failure is detected by inspecting the envelope, not the transport
//! status. Requests carry a timeout: a hung call must not leave the UI's
//! in-flight flags set forever.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Cart, NewProductForm, Product};

/// Header carrying the raw credential, as the API accepts it.
const TOKEN_HEADER: &str = "token";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or serialization failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `success: false`; the message is the
    /// human-readable reason from the envelope.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The server answered `success: true` but the payload was missing or
    /// unrecognizable.
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// The REST surface consumed by the client cache.
#[automock]
#[async_trait]
pub trait ShopApi: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError>;

    async fn fetch_my_products(&self, credential: &str) -> Result<Vec<Product>, ApiError>;

    async fn create_product(
        &self,
        credential: &str,
        form: NewProductForm,
    ) -> Result<Product, ApiError>;

    async fn update_stock(
        &self,
        credential: &str,
        product: Uuid,
        stock: u32,
    ) -> Result<Product, ApiError>;

    async fn remove_product(&self, credential: &str, product: Uuid) -> Result<(), ApiError>;

    async fn fetch_cart(&self, credential: &str) -> Result<Cart, ApiError>;

    async fn add_cart_item(
        &self,
        credential: &str,
        item: Uuid,
        size: &str,
    ) -> Result<(), ApiError>;

    async fn update_cart_item(
        &self,
        credential: &str,
        item: Uuid,
        size: &str,
        quantity: u32,
    ) -> Result<(), ApiError>;

    async fn fetch_wishlist(&self, credential: &str) -> Result<Vec<Uuid>, ApiError>;

    async fn add_wishlist(&self, credential: &str, product: Uuid) -> Result<Vec<Uuid>, ApiError>;

    async fn remove_wishlist(&self, credential: &str, product: Uuid)
    -> Result<Vec<Uuid>, ApiError>;
}

/// Connection settings for [`HttpShopApi`].
#[derive(Debug, Clone)]
pub struct ShopApiConfig {
    /// Backend base URL, e.g. `"http://localhost:8680"`.
    pub backend_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ShopApiConfig {
    #[must_use]
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// reqwest-backed [`ShopApi`] implementation.
#[derive(Debug, Clone)]
pub struct HttpShopApi {
    config: ShopApiConfig,
    http: Client,
}

impl HttpShopApi {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: ShopApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.backend_url)
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,

    #[serde(default)]
    message: Option<String>,

    #[serde(flatten)]
    data: Option<T>,
}

async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let envelope: ApiEnvelope<T> = response.json().await?;

    if !envelope.success {
        return Err(ApiError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "request failed".to_string()),
        ));
    }

    envelope
        .data
        .ok_or_else(|| ApiError::Unexpected("expected payload missing".to_string()))
}

/// For routes where only the `success` flag matters; a success envelope may
/// carry nothing beyond its message.
async fn confirm_envelope(response: reqwest::Response) -> Result<(), ApiError> {
    let envelope: ApiEnvelope<AnyPayload> = response.json().await?;

    if !envelope.success {
        return Err(ApiError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "request failed".to_string()),
        ));
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct ProductsPayload {
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct ProductPayload {
    product: Product,
}

#[derive(Debug, Deserialize)]
struct CartPayload {
    #[serde(rename = "cartData")]
    cart_data: Cart,
}

#[derive(Debug, Deserialize)]
struct WishlistPayload {
    wishlist: Vec<Uuid>,
}

/// Accepts any leftover envelope fields; used when only `success` matters.
#[derive(Debug, Deserialize)]
struct AnyPayload {}

#[async_trait]
impl ShopApi for HttpShopApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.http.get(self.url("/api/product/list")).send().await?;

        let payload: ProductsPayload = unwrap_envelope(response).await?;

        Ok(payload.products)
    }

    async fn fetch_my_products(&self, credential: &str) -> Result<Vec<Product>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/product/my-products"))
            .header(TOKEN_HEADER, credential)
            .send()
            .await?;

        let payload: ProductsPayload = unwrap_envelope(response).await?;

        Ok(payload.products)
    }

    async fn create_product(
        &self,
        credential: &str,
        form: NewProductForm,
    ) -> Result<Product, ApiError> {
        let sizes = serde_json::to_string(&form.sizes)
            .map_err(|error| ApiError::Unexpected(format!("failed to encode sizes: {error}")))?;

        let mut multipart = Form::new()
            .text("name", form.name)
            .text("description", form.description)
            .text("price", form.price)
            .text("category", form.category)
            .text("subCategory", form.sub_category)
            .text("sizes", sizes)
            .text("bestseller", if form.bestseller { "true" } else { "false" });

        if let Some(condition) = form.condition {
            multipart = multipart.text("condition", condition);
        }

        for (slot, image) in ["image1", "image2", "image3", "image4"]
            .into_iter()
            .zip(form.images)
        {
            multipart = multipart.part(slot, Part::bytes(image.bytes).file_name(image.filename));
        }

        let response = self
            .http
            .post(self.url("/api/product/add"))
            .header(TOKEN_HEADER, credential)
            .multipart(multipart)
            .send()
            .await?;

        let payload: ProductPayload = unwrap_envelope(response).await?;

        Ok(payload.product)
    }

    async fn update_stock(
        &self,
        credential: &str,
        product: Uuid,
        stock: u32,
    ) -> Result<Product, ApiError> {
        let response = self
            .http
            .post(self.url("/api/product/update"))
            .header(TOKEN_HEADER, credential)
            .form(&[("id", product.to_string()), ("stock", stock.to_string())])
            .send()
            .await?;

        let payload: ProductPayload = unwrap_envelope(response).await?;

        Ok(payload.product)
    }

    async fn remove_product(&self, credential: &str, product: Uuid) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/product/remove"))
            .header(TOKEN_HEADER, credential)
            .json(&serde_json::json!({ "id": product }))
            .send()
            .await?;

        confirm_envelope(response).await
    }

    async fn fetch_cart(&self, credential: &str) -> Result<Cart, ApiError> {
        let response = self
            .http
            .post(self.url("/api/cart/get"))
            .header(TOKEN_HEADER, credential)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let payload: CartPayload = unwrap_envelope(response).await?;

        Ok(payload.cart_data)
    }

    async fn add_cart_item(
        &self,
        credential: &str,
        item: Uuid,
        size: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/cart/add"))
            .header(TOKEN_HEADER, credential)
            .json(&serde_json::json!({ "itemId": item, "size": size }))
            .send()
            .await?;

        confirm_envelope(response).await
    }

    async fn update_cart_item(
        &self,
        credential: &str,
        item: Uuid,
        size: &str,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/cart/update"))
            .header(TOKEN_HEADER, credential)
            .json(&serde_json::json!({ "itemId": item, "size": size, "quantity": quantity }))
            .send()
            .await?;

        confirm_envelope(response).await
    }

    async fn fetch_wishlist(&self, credential: &str) -> Result<Vec<Uuid>, ApiError> {
        let response = self
            .http
            .post(self.url("/api/user/wishlist/get"))
            .header(TOKEN_HEADER, credential)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let payload: WishlistPayload = unwrap_envelope(response).await?;

        Ok(payload.wishlist)
    }

    async fn add_wishlist(&self, credential: &str, product: Uuid) -> Result<Vec<Uuid>, ApiError> {
        let response = self
            .http
            .post(self.url("/api/user/wishlist/add"))
            .header(TOKEN_HEADER, credential)
            .json(&serde_json::json!({ "productId": product }))
            .send()
            .await?;

        let payload: WishlistPayload = unwrap_envelope(response).await?;

        Ok(payload.wishlist)
    }

    async fn remove_wishlist(
        &self,
        credential: &str,
        product: Uuid,
    ) -> Result<Vec<Uuid>, ApiError> {
        let response = self
            .http
            .post(self.url("/api/user/wishlist/remove"))
            .header(TOKEN_HEADER, credential)
            .json(&serde_json::json!({ "productId": product }))
            .send()
            .await?;

        let payload: WishlistPayload = unwrap_envelope(response).await?;

        Ok(payload.wishlist)
    }
}
