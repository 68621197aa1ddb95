//! Media gateway contract.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

/// Opaque capability turning a raw file into a durable URL.
#[automock]
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Upload one file and return its hosted URL.
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, MediaGatewayError>;
}

/// Errors that can occur when talking to the hosting service.
#[derive(Debug, Error)]
pub enum MediaGatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The hosting service returned a non-2xx response or unexpected body.
    #[error("unexpected response from media host: {0}")]
    UnexpectedResponse(String),
}
