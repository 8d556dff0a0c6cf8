//! Point-of-sale transaction domain model.

use serde::{Deserialize, Serialize};

use super::Timestamp;

/// An amount recorded in one currency at one instant.
///
/// Transactions are values: converting one produces a new transaction and
/// leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosTransaction {
    /// Amount in major units of `currency`
    pub total: f64,
    /// Currency code, e.g. `"USD"`
    pub currency: String,
    /// When the transaction happened
    pub timestamp: Timestamp,
}

impl PosTransaction {
    /// Creates a new transaction.
    pub fn new(total: f64, currency: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            total,
            currency: currency.into(),
            timestamp,
        }
    }

    /// Returns a transaction at the same instant with a different amount and currency.
    pub fn restated(&self, total: f64, currency: impl Into<String>) -> Self {
        Self {
            total,
            currency: currency.into(),
            timestamp: self.timestamp,
        }
    }
}

impl std::fmt::Display for PosTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.6} {} at {}",
            self.total,
            self.currency,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
