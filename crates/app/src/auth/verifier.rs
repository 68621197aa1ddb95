//! HTTP client for the external credential verification service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::users::models::UserUuid;

/// Configuration for reaching the verification service.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Verifier address, e.g. `"http://localhost:8300"`.
    pub addr: String,

    /// Shared API key sent with every verification call.
    pub api_key: String,
}

/// Opaque capability turning a bearer credential into a user identity.
#[automock]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Resolve a credential to the user it identifies.
    async fn verify(&self, token: &str) -> Result<UserUuid, VerifierError>;
}

/// Calls the verification service over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteVerifier {
    config: VerifierConfig,
    http: Client,
}

impl RemoteVerifier {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: VerifierConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for RemoteVerifier {
    async fn verify(&self, token: &str) -> Result<UserUuid, VerifierError> {
        let url = format!("{}/v1/credentials/verify", self.config.addr);

        let body = serde_json::json!({ "token": token });

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(VerifierError::Rejected);
            }
            status if !status.is_success() => {
                let text = response.text().await.unwrap_or_default();

                return Err(VerifierError::UnexpectedResponse(format!(
                    "verify request failed with status {status}: {text}"
                )));
            }
            _ => {}
        }

        let parsed: VerifyResponse = response.json().await?;

        Ok(UserUuid::from_uuid(parsed.data.user_uuid))
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    data: VerifyData,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    user_uuid: Uuid,
}

/// Errors that can occur when communicating with the verifier.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// The verifier refused the credential.
    #[error("credential rejected by verifier")]
    Rejected,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The verifier returned a non-2xx response or unexpected body.
    #[error("unexpected response from verifier: {0}")]
    UnexpectedResponse(String),
}
