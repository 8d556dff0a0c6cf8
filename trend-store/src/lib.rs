//! # Trend Store
//!
//! Owns the rate trend of every non-base currency behind one lock and
//! implements the `RateSource` port the conversion engine reads through.
//!
//! Callers never get references into the live map: every read hands out
//! copies.

mod normalize;
mod store;


pub use normalize::normalize;
pub use store::{CurrencyTrendMap, TrendStore};
