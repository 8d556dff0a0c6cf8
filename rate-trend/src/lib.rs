//! Rate Trend: a Currency's Rate History as a Step Function
//!
//! A [`RateTrend`] stores the breakpoints of a right-continuous step function
//! `f(t)`: between one breakpoint and the next, `f` equals the rate of the
//! earlier one. Before the first breakpoint `f` is undefined.
//!
//! Inserting a validity interval rewrites only the breakpoints the interval
//! touches and merges equal neighbours, so the trend always holds the
//! smallest set of breakpoints describing the function.
//!
//! # Example
//! ```
//! use chrono::{TimeZone, Utc};
//! use pos_types::Rate;
//! use rate_trend::RateTrend;
//!
//! let day = |d| Utc.with_ymd_and_hms(2000, 1, d, 0, 0, 0).unwrap();
//!
//! let mut trend = RateTrend::new();
//! trend.insert_interval(day(1), day(10), Rate::Known(100.0));
//! trend.insert_interval(day(4), day(6), Rate::Known(90.0));
//!
//! assert_eq!(trend.rate_at(day(5)), Some(Rate::Known(90.0)));
//! assert_eq!(trend.rate_at(day(7)), Some(Rate::Known(100.0)));
//! assert_eq!(trend.rate_at(day(12)), Some(Rate::Unknown));
//! ```

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use pos_types::{Rate, Timestamp};
use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// Rate Trend
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered breakpoints of one currency's base-relative rate.
///
/// Invariants:
/// - no two adjacent breakpoints carry the same rate
/// - the first breakpoint is never [`Rate::Unknown`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateTrend {
    points: BTreeMap<Timestamp, Rate>,
}

impl RateTrend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Floor lookup: the rate of the latest breakpoint at or before `at`.
    ///
    /// `None` means `at` precedes every breakpoint.
    pub fn rate_at(&self, at: Timestamp) -> Option<Rate> {
        self.points.range(..=at).next_back().map(|(_, rate)| *rate)
    }

    /// Rate stored exactly at `at`, if a breakpoint sits there.
    pub fn breakpoint(&self, at: Timestamp) -> Option<Rate> {
        self.points.get(&at).copied()
    }

    /// Breakpoints in time order.
    pub fn points(&self) -> impl Iterator<Item = (Timestamp, Rate)> + '_ {
        self.points.iter().map(|(at, rate)| (*at, *rate))
    }

    /// Breakpoints with unknown rates surfaced as `-1`.
    pub fn to_raw(&self) -> BTreeMap<Timestamp, f64> {
        self.points().map(|(at, rate)| (at, rate.to_raw())).collect()
    }

    /// Makes `rate` effective on `[from, to)`.
    ///
    /// Whatever the function returned from `to` onward before the call is
    /// restored there afterwards. Does nothing unless `from < to`.
    pub fn insert_interval(&mut self, from: Timestamp, to: Timestamp, rate: Rate) {
        if from >= to {
            return;
        }
        let rate = canonical(rate);

        if self.points.is_empty() {
            if rate.is_known() {
                self.points.insert(from, rate);
                self.points.insert(to, Rate::Unknown);
            }
            return;
        }

        // `to` first: its continuation must be read before `from` is written.
        let upper = self.resolve_to(to, rate);
        let lower = self.resolve_from(from, rate);
        self.erase_between(lower, upper);
    }

    /// Makes `rate` effective from `from` onward, dropping every later breakpoint.
    pub fn insert_open_ended(&mut self, from: Timestamp, rate: Rate) {
        let rate = canonical(rate);

        if self.points.is_empty() {
            if rate.is_known() {
                self.points.insert(from, rate);
            }
            return;
        }

        let lower = self.resolve_from(from, rate);
        self.erase_between(lower, None);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Boundary resolution
    // ─────────────────────────────────────────────────────────────────────────

    /// Value of the function at `at`; undefined counts as unknown.
    fn value_at(&self, at: Timestamp) -> Rate {
        self.rate_at(at).unwrap_or(Rate::Unknown)
    }

    /// Places the breakpoint where the interval ends.
    ///
    /// Returns the first breakpoint that must survive after the interval, or
    /// `None` when everything after the interval start may go.
    fn resolve_to(&mut self, to: Timestamp, rate: Rate) -> Option<Timestamp> {
        let continuation = self.value_at(to);
        if continuation == rate {
            // The interval runs straight into an equal continuation.
            return self
                .points
                .range((Excluded(to), Unbounded))
                .next()
                .map(|(at, _)| *at);
        }

        self.points.insert(to, continuation);
        Some(to)
    }

    /// Places the breakpoint where the interval starts.
    ///
    /// Returns the breakpoint that now opens the interval, or `None` when the
    /// interval extends an undefined prefix (unknown rate, nothing before it).
    fn resolve_from(&mut self, from: Timestamp, rate: Rate) -> Option<Timestamp> {
        let previous = self
            .points
            .range(..from)
            .next_back()
            .map(|(at, rate)| (*at, *rate));

        match previous {
            Some((at, previous_rate)) if previous_rate == rate => Some(at),
            None if rate == Rate::Unknown => None,
            _ => {
                self.points.insert(from, rate);
                Some(from)
            }
        }
    }

    /// Removes every breakpoint strictly between `lower` and `upper`.
    /// `None` leaves that side unbounded.
    fn erase_between(&mut self, lower: Option<Timestamp>, upper: Option<Timestamp>) {
        if let (Some(lower), Some(upper)) = (lower, upper) {
            if lower >= upper {
                return;
            }
        }

        let lower = lower.map_or(Unbounded, Excluded);
        let upper = upper.map_or(Unbounded, Excluded);
        let superseded: Vec<Timestamp> = self
            .points
            .range((lower, upper))
            .map(|(at, _)| *at)
            .collect();

        for at in superseded {
            self.points.remove(&at);
        }
    }
}

/// Folds every non-usable rate into [`Rate::Unknown`].
fn canonical(rate: Rate) -> Rate {
    rate.value().map_or(Rate::Unknown, Rate::Known)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
