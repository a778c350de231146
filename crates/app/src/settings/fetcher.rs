//! Bounded-retry fee settings fetcher.

use std::time::Duration;

use async_trait::async_trait;
use feesplit::FeeConfiguration;
use mockall::automock;
use serde_json::Value;
use tracing::{Instrument, error, info_span, warn};

use crate::settings::{SettingsError, SettingsTransport};

/// How many times a settings request is attempted, and how long to wait
/// between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first; values below one count as one
    pub max_attempts: u32,

    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::ZERO,
        }
    }
}

/// Fetches fee settings through a transport, retrying failed attempts.
#[derive(Debug, Clone)]
pub struct SettingsFetcher<T> {
    transport: T,
    retry: RetryPolicy,
}

impl<T: SettingsTransport> SettingsFetcher<T> {
    /// Create a fetcher over the given transport.
    #[must_use]
    pub fn new(transport: T, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// Fetch and parse the settings, surfacing the final error.
    ///
    /// # Errors
    ///
    /// Returns the last transport error once every attempt has failed, or a
    /// [`SettingsError::Shape`] when the response has the wrong shape.
    pub async fn try_fetch(&self) -> Result<FeeConfiguration, SettingsError> {
        let body = self.fetch_body().await?;

        Ok(FeeConfiguration::from_response(body)?)
    }

    async fn fetch_body(&self) -> Result<Value, SettingsError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.transport.get_settings().await {
                Ok(body) => return Ok(body),
                Err(error) if error.is_retryable() && attempt < max_attempts => {
                    warn!(attempt, max_attempts, %error, "fee settings request failed, retrying");

                    if !self.retry.delay.is_zero() {
                        tokio::time::sleep(self.retry.delay).await;
                    }

                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[async_trait]
impl<T: SettingsTransport> ConfigSource for SettingsFetcher<T> {
    async fn load(&self) -> Option<FeeConfiguration> {
        let result = self
            .try_fetch()
            .instrument(info_span!("fee_settings_fetch"))
            .await;

        match result {
            Ok(config) => Some(config),
            Err(error @ SettingsError::Shape(_)) => {
                error!(
                    %error,
                    "fee settings have an unexpected shape, keeping previous settings"
                );

                None
            }
            Err(error) => {
                error!(
                    %error,
                    max_attempts = self.retry.max_attempts.max(1),
                    "fee settings unavailable, keeping previous settings"
                );

                None
            }
        }
    }
}

/// Source of fee configuration snapshots.
///
/// Failures are logged by the source and reported as `None`, so callers can
/// keep whatever configuration they already hold.
#[automock]
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Load the current fee configuration, or `None` when it is unavailable.
    async fn load(&self) -> Option<FeeConfiguration>;
}
