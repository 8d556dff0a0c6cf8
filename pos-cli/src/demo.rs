//! Built-in demonstration scenario.

use std::collections::BTreeMap;

use pos_convert::ConversionEngine;
use pos_types::{PosTransaction, UpdateError};
use trend_store::TrendStore;

use crate::config::Config;

fn report(result: Result<(), UpdateError>) {
    match result {
        Ok(()) => println!("Result: SUCCESS"),
        Err(err) => println!("Result: {} ({})", err.code(), err),
    }
}

/// Prints every trend in currency order.
pub fn print_trends(store: &TrendStore, config: &Config) {
    let snapshot = store.snapshot();
    let ordered: BTreeMap<_, _> = snapshot.iter().collect();

    for (currency, trend) in ordered {
        println!("Currency: '{}'. Trend:", currency);
        for (at, rate) in trend.points() {
            println!("\t{} -> {}", config.format_time(at), rate);
        }
    }
}

fn print_transaction(label: &str, tx: &PosTransaction, config: &Config) {
    println!("{}:", label);
    println!("\ttotal: {:.6}", tx.total);
    println!("\tcurrency: {}", tx.currency);
    println!("\ttime: {}", config.format_time(tx.timestamp));
}

/// Runs the scenario: updates, a snapshot, then conversions through the base.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let base = config.base_currency.as_str();
    let at = |value: &str| config.parse_time(value);

    println!("== Rate history for RUR (base {}) ==", base);
    let store = TrendStore::new(base)?;
    report(store.insert_interval(base, "RUR", at("2000-01-01")?, at("2000-01-02")?, 100.0));
    report(store.insert_interval("RUR", base, at("2000-02-01")?, at("2000-03-01")?, 0.011));
    report(store.insert_open_ended("RUR", base, at("2000-03-01")?, 0.012));
    report(store.insert_interval("EUR", "RUR", at("2000-02-01")?, at("2000-03-01")?, 0.11));
    print_trends(&store, config);

    println!();
    println!("== Conversions (base {}) ==", base);
    let store = TrendStore::new(base)?;
    report(store.insert_interval(base, "RUR", at("2000-01-01")?, at("2000-02-01")?, 100.0));
    report(store.insert_interval(base, "EUR", at("2000-01-01")?, at("2000-02-01")?, 1.1));
    let engine = ConversionEngine::new(store);

    let mid_january = at("2000-01-15")?;
    let conversions = [
        (PosTransaction::new(100.0, base, mid_january), "RUR"),
        (PosTransaction::new(100.0, "RUR", mid_january), "EUR"),
        (PosTransaction::new(100.0, "RUR", mid_january), "GBP"),
    ];

    for (tx, target) in &conversions {
        match engine.convert(tx, target) {
            Ok(converted) => {
                println!("Result: SUCCESS");
                print_transaction("From transaction", tx, config);
                print_transaction("To transaction", &converted, config);
            }
            Err(err) => println!("Result: {} ({})", err.code(), err),
        }
    }

    Ok(())
}
