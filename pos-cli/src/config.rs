//! Configuration loading from environment.

use std::env;

use anyhow::Context;
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};

use pos_types::Timestamp;

pub const DEFAULT_BASE_CURRENCY: &str = "USD";
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_currency: String,
    pub time_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_currency =
            env::var("POSFX_BASE_CURRENCY").unwrap_or_else(|_| DEFAULT_BASE_CURRENCY.to_string());
        let time_format =
            env::var("POSFX_TIME_FORMAT").unwrap_or_else(|_| DEFAULT_TIME_FORMAT.to_string());

        Self {
            base_currency,
            time_format,
        }
        .validated()
    }

    /// Replaces values given on the command line.
    pub fn with_overrides(
        mut self,
        base_currency: Option<String>,
        time_format: Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(base_currency) = base_currency {
            self.base_currency = base_currency;
        }
        if let Some(time_format) = time_format {
            self.time_format = time_format;
        }
        self.validated()
    }

    fn validated(self) -> anyhow::Result<Self> {
        if self.base_currency.trim().is_empty() {
            anyhow::bail!("Base currency cannot be empty");
        }
        if self.time_format.is_empty() {
            anyhow::bail!("Time format cannot be empty");
        }
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            anyhow::bail!("Invalid time format '{}'", self.time_format);
        }
        Ok(self)
    }

    /// Parses a UTC time string in the configured format.
    ///
    /// A bare `YYYY-MM-DD` date is accepted as midnight.
    pub fn parse_time(&self, value: &str) -> anyhow::Result<Timestamp> {
        let value = value.trim();
        if let Ok(at) = NaiveDateTime::parse_from_str(value, &self.time_format) {
            return Ok(at.and_utc());
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|at| at.and_utc())
            .with_context(|| format!("Invalid time '{}' (expected {})", value, self.time_format))
    }

    pub fn format_time(&self, at: Timestamp) -> String {
        at.format(&self.time_format).to_string()
    }
}
