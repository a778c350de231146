//! Fee Settings Config

use std::time::Duration;

use clap::Args;

use crate::{
    recompute::RefreshPolicy,
    settings::{DEFAULT_SETTINGS_PATH, RetryPolicy},
};

/// Fee settings endpoint and fetch behaviour.
#[derive(Debug, Args)]
pub struct SettingsConfig {
    /// Storefront base URL, e.g. `https://shop.example.com`
    #[arg(long, env = "FEESPLIT_SETTINGS_BASE_URL")]
    pub settings_base_url: String,

    /// Path of the fee settings endpoint
    #[arg(long, env = "FEESPLIT_SETTINGS_PATH", default_value = DEFAULT_SETTINGS_PATH)]
    pub settings_path: String,

    /// Total attempts per fetch, including the first
    #[arg(
        long,
        env = "FEESPLIT_SETTINGS_MAX_ATTEMPTS",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub settings_max_attempts: u32,

    /// Pause between attempts, in milliseconds
    #[arg(long, env = "FEESPLIT_SETTINGS_RETRY_DELAY_MS", default_value_t = 0)]
    pub settings_retry_delay_ms: u64,

    /// Minimum seconds between refetches on cart changes (0 refetches on every change)
    #[arg(long, env = "FEESPLIT_SETTINGS_REFRESH_INTERVAL_SECS", default_value_t = 60)]
    pub settings_refresh_interval_secs: u64,
}

impl SettingsConfig {
    /// Full URL of the fee settings endpoint.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.settings_base_url.trim_end_matches('/'),
            self.settings_path.trim_start_matches('/')
        )
    }

    /// Retry behaviour of a single fetch.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.settings_max_attempts,
            delay: Duration::from_millis(self.settings_retry_delay_ms),
        }
    }

    /// Refetch gating on cart changes.
    #[must_use]
    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy {
            min_interval: Duration::from_secs(self.settings_refresh_interval_secs),
        }
    }
}
