//! Configuration module

use std::path::PathBuf;

use clap::Parser;

pub use logging::{LogFormat, LoggingConfig};
pub use settings::SettingsConfig;
pub use summary::{OutputFormat, SummaryConfig};

mod logging;
mod settings;
mod summary;

/// Feesplit configuration
#[derive(Debug, Parser)]
#[command(
    name = "feesplit",
    about = "Break packaging and deposit fees out of a cart summary",
    long_about = None
)]
pub struct CliConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Fee settings endpoint settings.
    #[command(flatten)]
    pub settings: SettingsConfig,

    /// Summary rendering settings.
    #[command(flatten)]
    pub summary: SummaryConfig,

    /// Cart snapshot JSON file (`-` reads standard input)
    pub cart: PathBuf,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
