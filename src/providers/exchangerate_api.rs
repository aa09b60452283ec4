use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::{AppConfig, Secrets};
use crate::core::currency::{RateProvider, RateTable};
use crate::core::error::{ConvertError, Result};
use crate::providers::util::with_retry;

/// Client for the ExchangeRate-API v6 `latest` endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    retries: usize,
    delay_ms: u64,
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    result: Option<String>,
    time_last_update_utc: Option<String>,
    base_code: String,
    conversion_rates: HashMap<String, f64>,
}

// Body of a non-200 response, e.g. {"result":"error","error-type":"invalid-key"}
#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    #[serde(rename = "error-type")]
    error_type: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::build(base_url, api_key, None)
    }

    pub fn from_config(config: &AppConfig, secrets: &Secrets) -> Result<Self> {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        let provider = Self::build(config.base_url(), &secrets.api_key, timeout)?;
        Ok(provider.with_retry(config.retry.retries, config.retry.delay_ms))
    }

    fn build(base_url: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("fxc/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ConvertError::Network)?;

        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            retries: 0,
            delay_ms: 0,
        })
    }

    pub fn with_retry(mut self, retries: usize, delay_ms: u64) -> Self {
        self.retries = retries;
        self.delay_ms = delay_ms;
        self
    }

    fn url(&self, key: &str, base: &str) -> String {
        format!("{}/v6/{}/latest/{}", self.base_url, key, base)
    }

    async fn fetch_once(&self, base: &str) -> Result<RateTable> {
        let url = self.url(&self.api_key, base);
        debug!("Requesting rates from {}", self.url("***", base));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ConvertError::Network(e.without_url()))?;

        let status = response.status();
        if status != StatusCode::OK {
            // The error envelope is informational only; ignore unreadable bodies.
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ApiErrorResponse>(&body).ok())
                .map(|e| e.error_type);
            return Err(ConvertError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ConvertError::Body(e.without_url()))?;
        let data: LatestRatesResponse = serde_json::from_str(&text)?;

        debug!(
            result = ?data.result,
            last_update = ?data.time_last_update_utc,
            rates = data.conversion_rates.len(),
            "Received rates for {}",
            data.base_code
        );

        Ok(RateTable::new(data.base_code, data.conversion_rates))
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch(&self, base: &str) -> Result<RateTable> {
        if base.trim().is_empty() {
            return Err(ConvertError::Validation(
                "base currency must not be empty".to_string(),
            ));
        }
        with_retry(|| self.fetch_once(base), self.retries, self.delay_ms).await
    }
}
