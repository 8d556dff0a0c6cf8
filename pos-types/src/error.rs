//! Error types for rate updates and conversions.

use crate::domain::Timestamp;

/// Store construction errors. Not retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Base currency cannot be empty")]
    EmptyBaseCurrency,
}

/// Rejected rate updates. Nothing is written when one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdateError {
    #[error("One of currencies does not match base one: {from} -> {to} (base {base})")]
    CurrencyNotMatch {
        from: String,
        to: String,
        base: String,
    },

    #[error("Same currency specified while adding rate: {0}")]
    SameCurrency(String),

    #[error("Invalid date(s) specified (from >= to): {from} >= {to}")]
    InvalidDate { from: Timestamp, to: Timestamp },

    /// A positive quote whose base-relative form is not a finite positive number.
    #[error("Rate cannot be expressed against the base currency: {0:e}")]
    RateOutOfRange(f64),
}

impl UpdateError {
    /// Stable result code, e.g. for logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            UpdateError::CurrencyNotMatch { .. } => "CURRENCY_NOT_MATCH",
            UpdateError::SameCurrency(_) => "SAME_CURRENCY",
            UpdateError::InvalidDate { .. } => "INVALID_DATE",
            UpdateError::RateOutOfRange(_) => "INVALID_RATE",
        }
    }
}

/// Failed conversions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// No rate was ever inserted for the currency.
    #[error("No currency found for conversion: {0}")]
    NoCurrency(String),

    /// The currency has a trend, but no rate is in effect at the instant.
    #[error("No rate found for conversion: {currency} at {at}")]
    NoRate { currency: String, at: Timestamp },
}

impl ConversionError {
    /// Stable result code, e.g. for logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::NoCurrency(_) => "NO_CURRENCY",
            ConversionError::NoRate { .. } => "NO_RATE",
        }
    }
}
