//! Domain models for currency conversion.

pub mod rate;
pub mod transaction;

pub use rate::{Rate, UNKNOWN_RATE};
pub use transaction::PosTransaction;

/// Instant at which a rate takes effect or a transaction happened.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
