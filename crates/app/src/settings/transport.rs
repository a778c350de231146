//! HTTP transport for the fee settings endpoint.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde_json::Value;

use crate::settings::SettingsError;

/// Path of the fee settings endpoint on the storefront host.
pub const DEFAULT_SETTINGS_PATH: &str = "/_v/private/api/cart-bags-manager/app-settings";

/// Single-attempt HTTP client for the fee settings endpoint.
#[derive(Debug, Clone)]
pub struct HttpSettingsTransport {
    url: String,
    http: Client,
}

impl HttpSettingsTransport {
    /// Create a transport for the given endpoint URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Create a transport reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(http: Client, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }

    /// Endpoint URL this transport requests.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SettingsTransport for HttpSettingsTransport {
    async fn get_settings(&self) -> Result<Value, SettingsError> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            return Err(SettingsError::UnexpectedStatus { status, body });
        }

        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(SettingsError::InvalidBody)
    }
}

/// One round trip to the fee settings endpoint.
#[automock]
#[async_trait]
pub trait SettingsTransport: Send + Sync {
    /// Performs one request against the settings endpoint and returns its JSON
    /// body.
    async fn get_settings(&self) -> Result<Value, SettingsError>;
}
