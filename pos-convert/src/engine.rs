//! Conversion Engine
//!
//! Derives the rate in effect at a transaction's instant for both currencies
//! and combines them through the base currency into a cross-rate.

use tracing::debug;

use pos_types::{ConversionError, PosTransaction, RateSource, Timestamp, TrendLookup};

/// Converts transactions using rates from `S`.
pub struct ConversionEngine<S: RateSource> {
    source: S,
}

impl<S: RateSource> ConversionEngine<S> {
    /// Creates a new engine reading rates from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns a reference to the underlying rate source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Restates `tx` in `target` currency, at the rates in effect at `tx.timestamp`.
    ///
    /// The result keeps the original timestamp. Converting to the
    /// transaction's own currency returns an unchanged copy.
    pub fn convert(
        &self,
        tx: &PosTransaction,
        target: &str,
    ) -> Result<PosTransaction, ConversionError> {
        if tx.currency == target {
            return Ok(tx.clone());
        }

        let (from_rate, to_rate) = self
            .resolve_pair(&tx.currency, target, tx.timestamp)
            .inspect_err(|err| {
                debug!(
                    code = err.code(),
                    from = %tx.currency,
                    to = target,
                    at = %tx.timestamp,
                    "Conversion failed"
                )
            })?;

        let total = tx.total / from_rate * to_rate;
        debug!(
            from = %tx.currency,
            to = target,
            from_rate,
            to_rate,
            "Transaction converted"
        );
        Ok(tx.restated(total, target))
    }

    /// Units of `target` per one unit of `source` at `at`.
    pub fn rate_between(
        &self,
        source: &str,
        target: &str,
        at: Timestamp,
    ) -> Result<f64, ConversionError> {
        if source == target {
            return Ok(1.0);
        }

        let (from_rate, to_rate) = self.resolve_pair(source, target, at)?;
        Ok(to_rate / from_rate)
    }

    /// Base-relative rates of `source` and `target`, read in one lookup.
    ///
    /// Source-side failures are reported before target-side ones.
    fn resolve_pair(
        &self,
        source: &str,
        target: &str,
        at: Timestamp,
    ) -> Result<(f64, f64), ConversionError> {
        let base = self.source.base_currency();
        let wanted: Vec<&str> = [source, target]
            .into_iter()
            .filter(|currency| *currency != base)
            .collect();
        let mut lookups = self.source.rates_at(&wanted, at).into_iter();

        let mut resolve = |currency: &str| {
            if currency == base {
                return Ok(1.0);
            }
            let lookup = lookups.next().unwrap_or(TrendLookup::NoTrend);
            usable_rate(currency, lookup, at)
        };

        let from_rate = resolve(source)?;
        let to_rate = resolve(target)?;
        Ok((from_rate, to_rate))
    }
}

fn usable_rate(
    currency: &str,
    lookup: TrendLookup,
    at: Timestamp,
) -> Result<f64, ConversionError> {
    let no_rate = || ConversionError::NoRate {
        currency: currency.to_string(),
        at,
    };

    match lookup {
        TrendLookup::NoTrend => Err(ConversionError::NoCurrency(currency.to_string())),
        TrendLookup::BeforeFirstPoint => Err(no_rate()),
        TrendLookup::Point(rate) => rate.value().ok_or_else(no_rate),
    }
}
