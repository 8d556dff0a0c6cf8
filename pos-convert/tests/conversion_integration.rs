//! Integration tests for conversions against a real `TrendStore`.
//!
//! These tests populate the store through its public update API and verify
//! conversion results end to end, including under concurrent writers.

use std::sync::Arc;
use std::thread;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use pos_convert::ConversionEngine;
use pos_types::{ConversionError, PosTransaction, Timestamp};
use trend_store::TrendStore;

fn day(n: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
}

/// Store populated with the RUR history used across these tests.
fn example_engine() -> ConversionEngine<TrendStore> {
    let store = TrendStore::new("USD").unwrap();
    store.insert_interval("USD", "RUR", day(1), day(2), 100.0).unwrap();
    store.insert_interval("RUR", "USD", day(32), day(60), 0.011).unwrap();
    store.insert_open_ended("RUR", "USD", day(60), 0.012).unwrap();
    ConversionEngine::new(store)
}

#[test]
fn test_example_conversion_inside_first_interval() {
    let engine = example_engine();
    let at = day(1) + Duration::hours(12);

    let converted = engine
        .convert(&PosTransaction::new(100.0, "USD", at), "RUR")
        .unwrap();

    assert_eq!(converted, PosTransaction::new(10000.0, "RUR", at));
}

#[test]
fn test_example_conversion_inside_gap() {
    let engine = example_engine();

    let result = engine.convert(&PosTransaction::new(100.0, "USD", day(10)), "RUR");

    assert!(matches!(result, Err(ConversionError::NoRate { .. })));
}

#[test]
fn test_example_conversion_after_open_ended_start() {
    let engine = example_engine();

    let converted = engine
        .convert(&PosTransaction::new(1200.0, "RUR", day(400)), "USD")
        .unwrap();

    assert!((converted.total - 14.4).abs() < 1e-9);
}

#[test]
fn test_before_any_rate() {
    let engine = example_engine();

    let result = engine.convert(&PosTransaction::new(1.0, "RUR", day(0)), "USD");

    assert!(matches!(result, Err(ConversionError::NoRate { .. })));
}

#[test]
fn test_identity_conversion_without_rates() {
    let engine = ConversionEngine::new(TrendStore::new("USD").unwrap());

    for currency in ["RUR", "EUR", "GBP", "USD"] {
        let tx = PosTransaction::new(1.75, currency, day(100));
        assert_eq!(engine.convert(&tx, currency), Ok(tx));
    }
}

#[test]
fn test_cross_currency_through_base() {
    let store = TrendStore::new("USD").unwrap();
    store.insert_interval("USD", "RUR", day(0), day(31), 100.0).unwrap();
    store.insert_interval("USD", "EUR", day(0), day(31), 1.1).unwrap();
    let engine = ConversionEngine::new(store);

    let converted = engine
        .convert(&PosTransaction::new(100.0, "RUR", day(14)), "EUR")
        .unwrap();
    assert_eq!(converted.total, 100.0 / 100.0 * 1.1);

    let result = engine.convert(&PosTransaction::new(100.0, "RUR", day(14)), "GBP");
    assert_eq!(result, Err(ConversionError::NoCurrency("GBP".to_string())));
}

#[test]
fn test_months_with_declared_gap() {
    let store = TrendStore::new("USD").unwrap();
    store.insert_interval("USD", "RUR", day(0), day(31), 1.5).unwrap();
    store.insert_interval("USD", "RUR", day(60), day(91), 3.5).unwrap();
    store.insert_interval("USD", "RUR", day(91), day(121), -1.0).unwrap();
    let engine = ConversionEngine::new(store);

    let convert = |d: i64| engine.convert(&PosTransaction::new(2.0, "USD", day(d)), "RUR");

    for d in 0..31 {
        assert_eq!(convert(d).unwrap().total, 2.0 * 1.5);
    }
    for d in 31..60 {
        assert!(matches!(convert(d), Err(ConversionError::NoRate { .. })));
    }
    for d in 60..91 {
        assert_eq!(convert(d).unwrap().total, 2.0 * 3.5);
    }
    for d in 91..130 {
        assert!(matches!(convert(d), Err(ConversionError::NoRate { .. })));
    }
}

#[test]
fn test_concurrent_updates_and_conversions() {
    let store = Arc::new(TrendStore::new("USD").unwrap());
    store.insert_open_ended("USD", "EUR", day(0), 2.0).unwrap();
    store.insert_interval("USD", "GBP", day(0), day(1), 1.0).unwrap();
    let engine = Arc::new(ConversionEngine::new(Arc::clone(&store)));

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200 {
                    let from = day(i % 50);
                    let rate = 1.0 + ((w * 200 + i) % 7) as f64;
                    store
                        .insert_interval("USD", "GBP", from, from + Duration::days(3), rate)
                        .unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..200 {
                    let tx = PosTransaction::new(10.0, "USD", day(i % 60));
                    let converted = engine.convert(&tx, "EUR").unwrap();
                    assert_eq!(converted.total, 20.0);

                    // GBP is being rewritten concurrently: every answer must
                    // come from one whole insertion.
                    match engine.convert(&tx, "GBP") {
                        Ok(converted) => {
                            let rate = converted.total / 10.0;
                            assert_eq!(rate.fract(), 0.0);
                            assert!((1.0..=7.0).contains(&rate), "unexpected rate {}", rate);
                        }
                        Err(err) => assert!(
                            matches!(err, ConversionError::NoRate { .. }),
                            "unexpected error {:?}",
                            err
                        ),
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let trend = store.trend("GBP").unwrap();
    let points: Vec<_> = trend.points().collect();
    for pair in points.windows(2) {
        assert_ne!(pair[0].1, pair[1].1);
    }
}

proptest! {
    #[test]
    fn prop_cross_rate_consistency(
        r1 in 0.01f64..1000.0,
        r2 in 0.01f64..1000.0,
        amount in -1.0e6f64..1.0e6,
        d in 0i64..30,
    ) {
        let store = TrendStore::new("USD").unwrap();
        store.insert_interval("USD", "XXX", day(0), day(30), r1).unwrap();
        store.insert_interval("USD", "YYY", day(0), day(30), r2).unwrap();
        let engine = ConversionEngine::new(store);

        let converted = engine
            .convert(&PosTransaction::new(amount, "XXX", day(d)), "YYY")
            .unwrap();

        prop_assert_eq!(converted.total, amount / r1 * r2);
        prop_assert_eq!(converted.timestamp, day(d));
    }

    #[test]
    fn prop_interval_overwrites_and_restores(
        from in 0i64..20,
        len in 1i64..15,
        rate in 0.5f64..50.0,
    ) {
        let store = TrendStore::new("USD").unwrap();
        store.insert_interval("USD", "EUR", day(0), day(10), 1.0).unwrap();
        store.insert_interval("USD", "EUR", day(10), day(25), 2.0).unwrap();
        let before = store.trend("EUR").unwrap();

        store.insert_interval("USD", "EUR", day(from), day(from + len), rate).unwrap();
        let after = store.trend("EUR").unwrap();

        for d in 0..40 {
            let expected = if (from..from + len).contains(&d) {
                Some(pos_types::Rate::Known(rate))
            } else {
                before.rate_at(day(d))
            };
            prop_assert_eq!(after.rate_at(day(d)).filter(|r| r.is_known()), expected.filter(|r| r.is_known()));
        }
    }
}
