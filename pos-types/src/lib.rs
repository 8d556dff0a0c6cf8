//! # POS Types
//!
//! Domain types and port traits for point-of-sale currency conversion.
//! This crate has no IO and no locking - only data structures,
//! error types and the trait the conversion engine reads rates through.
//!
//! ## Layout
//!
//! - `domain/` - Rates, timestamps and transactions
//! - `ports/` - Trait definitions that rate stores must implement
//! - `error/` - Configuration, update and conversion errors

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{PosTransaction, Rate, Timestamp, UNKNOWN_RATE};
pub use error::{ConfigError, ConversionError, UpdateError};
pub use ports::{RateSource, TrendLookup};
