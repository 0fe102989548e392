//! The aggregate metrics state for one accounting period.
//!
//! A single [`Metrics`] value holds everything the tracker knows about the
//! current month: per-document line-count baselines, the latest observed
//! counts, churn totals and rankings, the session clock, and the goal
//! latches. It is mutated by every document event and every tick, and is
//! serialized wholesale for persistence across restarts.

mod aggregator;
mod clock;

pub use aggregator::{recompute, FileChurn};
pub use clock::SessionClock;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::goals::GoalTracker;
use crate::period::Period;

/// The aggregate metrics for the current period.
///
/// Document maps are ordered by document id so ranking tie-breaks and
/// recomputation are deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    /// Line count of each document when first observed this period.
    /// Immutable per key until the period rolls over.
    pub baselines: BTreeMap<String, u64>,
    /// Most recently observed line count of each document.
    pub current: BTreeMap<String, u64>,
    /// Sum of positive deltas across all tracked documents.
    pub additions_total: u64,
    /// Sum of negative deltas (magnitudes) across all tracked documents.
    pub deletions_total: u64,
    /// Documents with net additions, largest first. Empty when no document
    /// has a positive delta.
    #[serde(default)]
    pub top_additions: Vec<FileChurn>,
    /// Documents with net deletions, largest first.
    #[serde(default)]
    pub top_deletions: Vec<FileChurn>,
    /// Active time accumulated this period.
    #[serde(default)]
    pub clock: SessionClock,
    /// The calendar month these counters apply to.
    pub period: Period,
    /// Monthly goal latches.
    #[serde(default)]
    pub goals: GoalTracker,
}

impl Metrics {
    /// A fresh aggregate for the period containing `now`: empty maps, zero
    /// counters, goal latches unset.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            baselines: BTreeMap::new(),
            current: BTreeMap::new(),
            additions_total: 0,
            deletions_total: 0,
            top_additions: Vec::new(),
            top_deletions: Vec::new(),
            clock: SessionClock::default(),
            period: Period::of(now),
            goals: GoalTracker::default(),
        }
    }

    /// Record an observation of a document's line count.
    ///
    /// The first observation of a document in a period fixes its baseline;
    /// every observation refreshes the current count. A later observation
    /// (including a save) never re-baselines an already-tracked document.
    pub fn observe(&mut self, document_id: &str, line_count: u64) {
        self.baselines
            .entry(document_id.to_string())
            .or_insert(line_count);
        self.current.insert(document_id.to_string(), line_count);
    }

    /// Net signed delta across all tracked documents. Documents without a
    /// baseline are skipped.
    pub fn net_delta(&self) -> i64 {
        self.baselines
            .iter()
            .filter_map(|(doc, &baseline)| {
                let current = self.current.get(doc)?;
                Some(*current as i64 - baseline as i64)
            })
            .sum()
    }
}
