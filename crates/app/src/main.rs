//! Feesplit CLI
//!
//! Recomputes the summary of a cart snapshot with packaging and deposit fees
//! broken out, using fee settings fetched from the storefront.

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use feesplit::{CartSnapshot, SummaryError, SummaryView};
use feesplit_app::{
    config::{CliConfig, OutputFormat},
    observability,
    recompute::SummaryRecomputer,
    settings::{HttpSettingsTransport, SettingsFetcher},
};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read cart snapshot {}: {source}", path.display())]
    ReadCart {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid cart snapshot: {0}")]
    ParseCart(#[source] serde_json::Error),

    #[error("failed to encode summary: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Render(#[from] SummaryError),

    #[error("failed to write summary: {0}")]
    Write(#[from] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = CliConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");

            ExitCode::FAILURE
        }
    }
}

async fn run(config: CliConfig) -> Result<(), CliError> {
    let snapshot = read_snapshot(&config.cart)?;

    let url = config.settings.endpoint_url();
    info!(%url, items = snapshot.items.len(), "recomputing cart summary");

    let fetcher = SettingsFetcher::new(
        HttpSettingsTransport::new(url),
        config.settings.retry_policy(),
    );

    let mut recomputer = SummaryRecomputer::new(
        Arc::new(fetcher),
        config.summary.reconciler(),
        config.settings.refresh_policy(),
    );

    recomputer.activate();
    recomputer.settled().await;
    recomputer.update_cart(snapshot);

    let output = recomputer.current();
    recomputer.teardown();

    write_summary(&output.view, config.summary.format)
}

fn read_snapshot(path: &Path) -> Result<CartSnapshot, CliError> {
    let read_error = |source| CliError::ReadCart {
        path: path.to_path_buf(),
        source,
    };

    let raw = if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw).map_err(read_error)?;
        raw
    } else {
        fs::read_to_string(path).map_err(read_error)?
    };

    serde_json::from_str(&raw).map_err(CliError::ParseCart)
}

fn write_summary(view: &SummaryView, format: OutputFormat) -> Result<(), CliError> {
    let mut rendered = match format {
        OutputFormat::Table => {
            let mut table = String::new();
            view.write_to(&mut table)?;
            table
        }
        OutputFormat::Json => serde_json::to_string_pretty(view).map_err(CliError::Encode)?,
    };

    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    io::stdout().lock().write_all(rendered.as_bytes())?;

    Ok(())
}
