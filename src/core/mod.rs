//! Core conversion abstractions and ambient services

pub mod config;
pub mod currency;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use config::{AppConfig, Secrets};
pub use currency::{RateProvider, RateTable};
pub use error::{ConvertError, Result};
