//! Churn aggregation: signed deltas, totals and rankings.
//!
//! `recompute` is a full pass over every tracked document, not an
//! incremental update. Each call rebuilds the totals and rankings from the
//! baseline/current pair, so the result stays consistent even when document
//! notifications are dropped or arrive out of order, and re-running it
//! without new events reproduces identical output.

use serde::{Deserialize, Serialize};

use super::Metrics;

/// One document's churn in a ranking, in lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChurn {
    pub document: String,
    pub lines: u64,
}

/// Rebuild totals and rankings from the current baseline/current maps.
///
/// A document contributes `current - baseline`: positive deltas feed
/// `additions_total` and the additions ranking, negative ones (negated)
/// feed `deletions_total` and the deletions ranking, zero contributes
/// nothing. Both rankings end up sorted descending by magnitude; on equal
/// magnitudes the stable sort preserves document-id order. A current entry
/// with no baseline has no meaningful delta and is skipped.
pub fn recompute(metrics: &mut Metrics) {
    let mut additions_total = 0u64;
    let mut deletions_total = 0u64;
    let mut additions = Vec::new();
    let mut deletions = Vec::new();

    for (document, &baseline) in &metrics.baselines {
        let Some(&current) = metrics.current.get(document) else {
            continue;
        };
        let delta = current as i64 - baseline as i64;
        if delta > 0 {
            additions_total += delta as u64;
            additions.push(FileChurn {
                document: document.clone(),
                lines: delta as u64,
            });
        } else if delta < 0 {
            let magnitude = delta.unsigned_abs();
            deletions_total += magnitude;
            deletions.push(FileChurn {
                document: document.clone(),
                lines: magnitude,
            });
        }
    }

    additions.sort_by(|a, b| b.lines.cmp(&a.lines));
    deletions.sort_by(|a, b| b.lines.cmp(&a.lines));

    metrics.additions_total = additions_total;
    metrics.deletions_total = deletions_total;
    metrics.top_additions = additions;
    metrics.top_deletions = deletions;
}
