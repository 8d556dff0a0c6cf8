//! Rate source port.
//!
//! The conversion engine reads base-relative rates through this trait.
//! Implementations own the trend data; the engine only ever sees lookup results.

use std::sync::Arc;

use crate::domain::{Rate, Timestamp};

/// Outcome of a floor lookup in one currency's trend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendLookup {
    /// No rate was ever inserted for the currency.
    NoTrend,
    /// The trend has no breakpoint at or before the requested instant.
    BeforeFirstPoint,
    /// Rate of the latest breakpoint at or before the requested instant.
    Point(Rate),
}

/// Port trait for base-relative rate storage.
pub trait RateSource: Send + Sync {
    /// The single currency every stored rate is quoted against.
    fn base_currency(&self) -> &str;

    /// Floor lookup of every requested currency at `at`.
    ///
    /// All answers come from one consistent view of the store, in the order
    /// the currencies were requested.
    fn rates_at(&self, currencies: &[&str], at: Timestamp) -> Vec<TrendLookup>;
}

impl<T: RateSource + ?Sized> RateSource for Arc<T> {
    fn base_currency(&self) -> &str {
        (**self).base_currency()
    }

    fn rates_at(&self, currencies: &[&str], at: Timestamp) -> Vec<TrendLookup> {
        (**self).rates_at(currencies, at)
    }
}
