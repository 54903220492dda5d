//! Common types used across the platform

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default look-ahead for the near-expiry report, in days
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u64 = 30;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MovementType {
    /// Lot receipt
    #[serde(rename = "ENTRADA")]
    In,
    /// Sale line
    #[serde(rename = "SAÍDA")]
    Out,
}

impl MovementType {
    /// Sign applied to the raw row quantity
    pub fn sign(&self) -> i64 {
        match self {
            MovementType::In => 1,
            MovementType::Out => -1,
        }
    }
}

/// Parses the `IN`/`OUT` tag emitted by the movement query
impl FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(MovementType::In),
            "OUT" => Ok(MovementType::Out),
            other => Err(format!("unknown movement type: {}", other)),
        }
    }
}

/// A calendar month of a given year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Look-ahead window for the near-expiry report. Always at least one day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpiryWindow(u64);

impl ExpiryWindow {
    /// Returns `None` for a zero-day window
    pub fn new(days: u64) -> Option<Self> {
        (days > 0).then_some(Self(days))
    }

    pub fn days(&self) -> u64 {
        self.0
    }

    /// Last date covered by the window, inclusive. Saturates at the largest
    /// representable date.
    pub fn end_from(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(self.0))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl Default for ExpiryWindow {
    fn default() -> Self {
        Self(DEFAULT_EXPIRY_WINDOW_DAYS)
    }
}
