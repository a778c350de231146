//! Fee settings errors.

use feesplit::SettingsShapeError;
use thiserror::Error;

/// Errors that can occur while retrieving fee settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("settings request failed with status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,

        /// Response body, as text
        body: String,
    },

    /// The response body was not JSON.
    #[error("settings response is not JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The response was JSON of the wrong shape.
    #[error(transparent)]
    Shape(#[from] SettingsShapeError),
}

impl SettingsError {
    /// Whether another attempt may succeed.
    ///
    /// Transport, status and body errors are retried; a well-formed response
    /// of the wrong shape is not.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Shape(_))
    }
}
