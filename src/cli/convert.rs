use crate::core::{ConvertError, RateProvider, Result};
use std::fmt;
use tracing::{debug, instrument};

/// A validated conversion request. Currency codes are trimmed and uppercased.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: &str, to: &str) -> Result<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConvertError::Validation(format!(
                "amount must be greater than zero, got {amount}"
            )));
        }

        let from = normalize_code(from, "from")?;
        let to = normalize_code(to, "to")?;
        Ok(ConversionRequest { amount, from, to })
    }
}

fn normalize_code(code: &str, flag: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ConvertError::Validation(format!(
            "--{flag} currency must not be empty"
        )));
    }
    Ok(code.to_uppercase())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub converted: f64,
    pub to: String,
    pub rate: f64,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            self.amount, self.from, self.converted, self.to
        )
    }
}

/// Fetches rates for `request.from` and converts the amount into `request.to`.
#[instrument(skip(provider), fields(from = %request.from, to = %request.to))]
pub async fn convert(provider: &dyn RateProvider, request: &ConversionRequest) -> Result<Conversion> {
    let table = provider.fetch(&request.from).await?;
    let rate = table.rate_for(&request.to)?;
    debug!(rate, base = %table.base_code, "Found conversion rate");

    Ok(Conversion {
        amount: request.amount,
        from: request.from.clone(),
        converted: request.amount * rate,
        to: request.to.clone(),
        rate,
    })
}
