pub mod cli;
pub mod core;
pub mod providers;

pub use crate::cli::convert::{Conversion, ConversionRequest};
pub use crate::core::{ConvertError, Result};

use crate::core::{AppConfig, Secrets};
use crate::providers::exchangerate_api::ExchangeRateApiProvider;
use std::path::Path;
use tracing::{debug, info};

/// Loads configuration and secrets, then performs a single conversion
/// against ExchangeRate-API.
pub async fn run(
    request: &ConversionRequest,
    config_path: Option<&str>,
    env_file: Option<&Path>,
) -> Result<Conversion> {
    info!("fxc starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let secrets = Secrets::load(env_file)?;
    run_with(request, &config, &secrets).await
}

/// Performs a single conversion with already resolved config and secrets.
pub async fn run_with(
    request: &ConversionRequest,
    config: &AppConfig,
    secrets: &Secrets,
) -> Result<Conversion> {
    let provider = ExchangeRateApiProvider::from_config(config, secrets)?;
    cli::convert::convert(&provider, request).await
}
