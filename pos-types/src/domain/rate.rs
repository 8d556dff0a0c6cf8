//! Base-relative exchange rate with an explicit "unknown" state.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Raw value that stands for [`Rate::Unknown`] wherever a plain number is expected.
pub const UNKNOWN_RATE: f64 = -1.0;

/// Rate of one currency against the base currency.
///
/// Stored rates always mean "units of this currency per one unit of the
/// base currency". A period with no known rate is [`Rate::Unknown`] rather
/// than a magic negative number, so it can never be mistaken for a real rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rate {
    /// A strictly positive, finite multiplier.
    Known(f64),
    /// No rate is defined.
    Unknown,
}

impl Rate {
    /// Interprets a raw number: anything that is not finite and positive is unknown.
    pub fn from_raw(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Rate::Known(value)
        } else {
            Rate::Unknown
        }
    }

    /// Returns the raw number, using [`UNKNOWN_RATE`] for unknown rates.
    pub fn to_raw(self) -> f64 {
        match self {
            Rate::Known(value) => value,
            Rate::Unknown => UNKNOWN_RATE,
        }
    }

    /// Returns the multiplier if it can be used for a conversion.
    pub fn value(self) -> Option<f64> {
        match self {
            Rate::Known(value) if value.is_finite() && value > 0.0 => Some(value),
            _ => None,
        }
    }

    pub fn is_known(self) -> bool {
        self.value().is_some()
    }

    /// Flips the quotation direction (`1 / rate`). Unknown stays unknown.
    pub fn inverse(self) -> Self {
        match self.value() {
            Some(value) => Rate::from_raw(1.0 / value),
            None => Rate::Unknown,
        }
    }
}

impl From<f64> for Rate {
    fn from(value: f64) -> Self {
        Rate::from_raw(value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rate::Known(value) => write!(f, "{:.6}", value),
            Rate::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_raw())
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Rate::from_raw)
    }
}
