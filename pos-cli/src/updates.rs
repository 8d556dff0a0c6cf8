//! Rate update files.
//!
//! A rates file is a JSON array of updates applied in order:
//!
//! ```json
//! [
//!   { "from": "USD", "to": "RUR", "from_time": "2000-01-01 00:00:00",
//!     "to_time": "2000-01-02 00:00:00", "rate": 100.0 },
//!   { "from": "RUR", "to": "USD", "from_time": "2000-03-01 00:00:00", "rate": 0.012 }
//! ]
//! ```
//!
//! An update without `to_time` stays in effect indefinitely.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

use trend_store::TrendStore;

use crate::config::Config;

/// One quoted rate for a period.
#[derive(Debug, Clone, Deserialize)]
pub struct RateUpdate {
    pub from: String,
    pub to: String,
    pub from_time: String,
    #[serde(default)]
    pub to_time: Option<String>,
    pub rate: f64,
}

/// Reads every update from a rates file.
pub fn load(path: &Path) -> anyhow::Result<Vec<RateUpdate>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rates file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse rates file {}", path.display()))
}

/// Applies `updates` in order and returns how many the store accepted.
///
/// Rejected updates are logged and skipped; unparseable times abort.
pub fn apply(store: &TrendStore, updates: &[RateUpdate], config: &Config) -> anyhow::Result<usize> {
    let mut accepted = 0;

    for (index, update) in updates.iter().enumerate() {
        let from = config.parse_time(&update.from_time)?;
        let result = match &update.to_time {
            Some(to_time) => {
                let to = config.parse_time(to_time)?;
                store.insert_interval(&update.from, &update.to, from, to, update.rate)
            }
            None => store.insert_open_ended(&update.from, &update.to, from, update.rate),
        };

        match result {
            Ok(()) => accepted += 1,
            Err(err) => warn!(index, code = err.code(), "Skipping rate update: {}", err),
        }
    }

    info!(accepted, total = updates.len(), "Rate updates applied");
    Ok(accepted)
}
