//! Lock-guarded map of currency trends.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use pos_types::{ConfigError, Rate, RateSource, Timestamp, TrendLookup, UpdateError};
use rate_trend::RateTrend;

use crate::normalize::normalize;

/// Copy of every currency's trend, keyed by currency code.
pub type CurrencyTrendMap = HashMap<String, RateTrend>;

/// Base-relative rate trends for every currency quoted against one base.
///
/// A single lock guards the whole map: updates hold the write side for their
/// full duration, so readers never observe half of an insertion.
#[derive(Debug)]
pub struct TrendStore {
    base_currency: String,
    trends: RwLock<CurrencyTrendMap>,
}

impl TrendStore {
    /// Creates an empty store quoting everything against `base_currency`.
    pub fn new(base_currency: impl Into<String>) -> Result<Self, ConfigError> {
        let base_currency = base_currency.into();
        if base_currency.trim().is_empty() {
            return Err(ConfigError::EmptyBaseCurrency);
        }

        Ok(Self {
            base_currency,
            trends: RwLock::new(HashMap::new()),
        })
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Updates
    // ─────────────────────────────────────────────────────────────────────────

    /// Records that `from_currency -> to_currency` traded at `rate` on `[from, to)`.
    ///
    /// One side must be the base currency. A non-positive rate declares the
    /// period as having no known rate.
    pub fn insert_interval(
        &self,
        from_currency: &str,
        to_currency: &str,
        from: Timestamp,
        to: Timestamp,
        rate: impl Into<Rate>,
    ) -> Result<(), UpdateError> {
        self.check_currencies(from_currency, to_currency)?;
        if from >= to {
            let err = UpdateError::InvalidDate { from, to };
            debug!(code = err.code(), "Rate interval rejected");
            return Err(err);
        }

        let (currency, rate) = self.normalized(from_currency, to_currency, rate.into())?;

        let mut trends = self.trends.write();
        let trend = trends.entry(currency.to_string()).or_default();
        trend.insert_interval(from, to, rate);

        debug!(
            currency,
            %from,
            %to,
            %rate,
            breakpoints = trend.len(),
            "Rate interval inserted"
        );
        Ok(())
    }

    /// Records that `from_currency -> to_currency` trades at `rate` from `from` on.
    ///
    /// Every rate previously known after `from` is discarded.
    pub fn insert_open_ended(
        &self,
        from_currency: &str,
        to_currency: &str,
        from: Timestamp,
        rate: impl Into<Rate>,
    ) -> Result<(), UpdateError> {
        self.check_currencies(from_currency, to_currency)?;

        let (currency, rate) = self.normalized(from_currency, to_currency, rate.into())?;

        let mut trends = self.trends.write();
        let trend = trends.entry(currency.to_string()).or_default();
        trend.insert_open_ended(from, rate);

        debug!(
            currency,
            %from,
            %rate,
            breakpoints = trend.len(),
            "Open-ended rate inserted"
        );
        Ok(())
    }

    fn check_currencies(&self, from_currency: &str, to_currency: &str) -> Result<(), UpdateError> {
        let result = if from_currency != self.base_currency && to_currency != self.base_currency {
            Err(UpdateError::CurrencyNotMatch {
                from: from_currency.to_string(),
                to: to_currency.to_string(),
                base: self.base_currency.clone(),
            })
        } else if from_currency == to_currency {
            Err(UpdateError::SameCurrency(from_currency.to_string()))
        } else {
            Ok(())
        };

        if let Err(err) = &result {
            debug!(code = err.code(), "Rate update rejected");
        }
        result
    }

    /// Base-relative form of a quote. A usable quote must stay usable, so a
    /// subnormal rate that inverts to infinity is refused instead of turning
    /// into a gap.
    fn normalized<'a>(
        &self,
        from_currency: &'a str,
        to_currency: &'a str,
        rate: Rate,
    ) -> Result<(&'a str, Rate), UpdateError> {
        let (currency, normalized) =
            normalize(from_currency, to_currency, rate, &self.base_currency);

        if rate.is_known() && !normalized.is_known() {
            let err = UpdateError::RateOutOfRange(rate.to_raw());
            debug!(code = err.code(), currency, "Rate update rejected");
            return Err(err);
        }
        Ok((currency, normalized))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Deep copy of every trend.
    pub fn snapshot(&self) -> CurrencyTrendMap {
        self.trends.read().clone()
    }

    /// Deep copy of one currency's trend.
    pub fn trend(&self, currency: &str) -> Option<RateTrend> {
        self.trends.read().get(currency).cloned()
    }
}

impl RateSource for TrendStore {
    fn base_currency(&self) -> &str {
        &self.base_currency
    }

    fn rates_at(&self, currencies: &[&str], at: Timestamp) -> Vec<TrendLookup> {
        let trends = self.trends.read();
        currencies
            .iter()
            .map(|currency| match trends.get(*currency) {
                None => TrendLookup::NoTrend,
                Some(trend) => trend
                    .rate_at(at)
                    .map_or(TrendLookup::BeforeFirstPoint, TrendLookup::Point),
            })
            .collect()
    }
}
