//! Exchange rate abstractions

use crate::core::error::{ConvertError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Rates for one base currency, keyed by target currency code.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base_code: String,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(base_code: impl Into<String>, rates: HashMap<String, f64>) -> Self {
        Self {
            base_code: base_code.into(),
            rates,
        }
    }

    /// Looks up the rate converting one unit of `base_code` into `code`.
    pub fn rate_for(&self, code: &str) -> Result<f64> {
        let rate = *self
            .rates
            .get(code)
            .ok_or_else(|| ConvertError::CurrencyNotFound(code.to_string()))?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConvertError::InvalidRate {
                code: code.to_string(),
                rate,
            });
        }
        Ok(rate)
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch(&self, base: &str) -> Result<RateTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd_table() -> RateTable {
        RateTable::new(
            "USD",
            HashMap::from([
                ("USD".to_string(), 1.0),
                ("EUR".to_string(), 0.92),
                ("JPY".to_string(), 149.5),
                ("BAD".to_string(), 0.0),
            ]),
        )
    }

    #[test]
    fn test_rate_lookup() {
        let table = usd_table();
        assert_eq!(table.rate_for("EUR").unwrap(), 0.92);
        assert_eq!(table.rate_for("USD").unwrap(), 1.0);
    }

    #[test]
    fn test_missing_currency_names_code() {
        let err = usd_table().rate_for("XYZ").unwrap_err();
        assert!(matches!(err, ConvertError::CurrencyNotFound(ref c) if c == "XYZ"));
        assert_eq!(err.to_string(), "Currency XYZ not found");
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let err = usd_table().rate_for("BAD").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidRate { .. }));
    }
}
