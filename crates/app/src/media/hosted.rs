//! HTTP client for the hosted media service.

use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;

use crate::media::gateway::{MediaGateway, MediaGatewayError};

/// Configuration for connecting to the media host.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Media host address, e.g. `"https://media.example"`.
    pub addr: String,

    /// API key sent with every upload.
    pub api_key: String,
}

/// HTTP client for the hosted upload endpoint.
#[derive(Debug, Clone)]
pub struct HostedMediaClient {
    config: MediaConfig,
    http: Client,
}

impl HostedMediaClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: MediaConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl MediaGateway for HostedMediaClient {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, MediaGatewayError> {
        let url = format!("{}/v1/images", self.config.addr);

        let form = Form::new().part("file", Part::bytes(bytes).file_name(filename.to_string()));

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MediaGatewayError::UnexpectedResponse(format!(
                "upload request failed with status {status}: {text}"
            )));
        }

        let parsed: UploadResponse = response.json().await?;

        Ok(parsed.data.secure_url)
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    secure_url: String,
}
