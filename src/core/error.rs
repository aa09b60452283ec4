//! Error types for rate retrieval and conversion.
//!
//! Every variant is fatal for the CLI; the binary reports the message and
//! exits. `is_transient` decides which failures the retry helper may repeat.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// Config file could not be located, read or parsed.
    #[error("Failed to load config: {0}")]
    Config(String),

    /// Env file exists but could not be read or parsed.
    #[error("Failed to load env file {}: {}", .path.display(), .source)]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("API key not found: set {0} in the environment or the env file")]
    MissingApiKey(&'static str),

    /// Invalid command-line input.
    #[error("Invalid parameters: {0}")]
    Validation(String),

    #[error("Request error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-200 response. `detail` carries the API's `error-type` when present.
    #[error("API returned error code: {}{}", .status, .detail.as_ref().map(|d| format!(" ({d})")).unwrap_or_default())]
    Api { status: u16, detail: Option<String> },

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Currency {0} not found")]
    CurrencyNotFound(String),

    #[error("Invalid rate {rate} for currency {code}")]
    InvalidRate { code: String, rate: f64 },
}

impl ConvertError {
    /// Transport failures, rate limiting and server-side errors are worth
    /// another attempt. Everything else fails the same way twice.
    pub fn is_transient(&self) -> bool {
        match self {
            ConvertError::Network(_) => true,
            ConvertError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
