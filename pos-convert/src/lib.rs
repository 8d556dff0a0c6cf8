//! # POS Convert
//!
//! Converts point-of-sale transactions between currencies using
//! base-relative rates read through the `RateSource` port.
//!
//! The engine is generic over `S: RateSource`, so the store behind it can be
//! swapped without code changes (tests use an in-memory mock).

pub mod engine;


pub use engine::ConversionEngine;
