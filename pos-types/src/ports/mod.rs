//! Port traits (interfaces for adapters).
//!
//! The conversion engine depends on these traits, not on a concrete store.

mod rates;

pub use rates::{RateSource, TrendLookup};
