//! Calendar-month accounting periods.
//!
//! All counters in [`crate::Metrics`] apply to exactly one period. When the
//! wall clock crosses into a new month the engine discards the aggregate
//! wholesale and starts fresh.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (year + month), the window over which totals accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// The period containing the given instant.
    pub fn of(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// Whether the given instant still falls inside this period.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        *self == Period::of(at)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
