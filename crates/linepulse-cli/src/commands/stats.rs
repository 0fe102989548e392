//! Render the persisted metrics snapshot.
//!
//! This is the presentation boundary: empty rankings are shown with the
//! `("N/A", 0)` placeholder here, never inside the core data model.

use clap::Subcommand;
use linepulse_core::{FileChurn, Metrics, MetricsStore};
use serde::Serialize;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Human-oriented summary of the current period
    Show,
    /// Full snapshot as stored
    Raw,
}

#[derive(Serialize)]
struct StatsReport {
    period: String,
    lines_added: u64,
    lines_removed: u64,
    net_lines: i64,
    active_time: String,
    top_additions: Vec<(String, u64)>,
    top_deletions: Vec<(String, u64)>,
    tracked_documents: usize,
}

fn placeholder_ranking(ranking: &[FileChurn]) -> Vec<(String, u64)> {
    if ranking.is_empty() {
        return vec![("N/A".to_string(), 0)];
    }
    ranking
        .iter()
        .map(|c| (c.document.clone(), c.lines))
        .collect()
}

fn report(metrics: &Metrics) -> StatsReport {
    StatsReport {
        period: metrics.period.to_string(),
        lines_added: metrics.additions_total,
        lines_removed: metrics.deletions_total,
        net_lines: metrics.net_delta(),
        active_time: format!(
            "{}h {:02}m {:02}s",
            metrics.clock.hours, metrics.clock.minutes, metrics.clock.seconds
        ),
        top_additions: placeholder_ranking(&metrics.top_additions),
        top_deletions: placeholder_ranking(&metrics.top_deletions),
        tracked_documents: metrics.baselines.len(),
    }
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = MetricsStore::open()?;
    let metrics = store.load()?;

    match action {
        StatsAction::Show => match metrics {
            Some(metrics) => println!("{}", serde_json::to_string_pretty(&report(&metrics))?),
            None => println!("no metrics recorded yet"),
        },
        StatsAction::Raw => match metrics {
            Some(metrics) => println!("{}", serde_json::to_string_pretty(&metrics)?),
            None => println!("no metrics recorded yet"),
        },
    }
    Ok(())
}
