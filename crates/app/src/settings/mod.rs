//! Fee Settings
//!
//! Retrieval of the fee-classification configuration.

mod errors;
mod fetcher;
mod transport;

pub use errors::SettingsError;
pub use fetcher::{ConfigSource, MockConfigSource, RetryPolicy, SettingsFetcher};
pub use transport::{
    DEFAULT_SETTINGS_PATH, HttpSettingsTransport, MockSettingsTransport, SettingsTransport,
};
