//! Metrics engine implementation.
//!
//! The engine is a caller-driven state machine. It does not use internal
//! threads or timers - the host feeds it document events and calls `tick()`
//! once per second.
//!
//! ## Tick pipeline
//!
//! Each tick runs, in order: period rollover check, churn recomputation,
//! clock advance, goal evaluation. The host should push the latest goal
//! configuration via [`MetricsEngine::set_goals`] before ticking, so goals
//! are never checked against stale thresholds or stale totals.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = MetricsEngine::new(Utc::now());
//! engine.document_activated("src/main.rs", 120);
//! engine.document_saved("src/main.rs", 140);
//! // In a loop, once per second:
//! engine.set_goals(GoalConfig::load_or_default());
//! let events = engine.tick(Utc::now()); // goal/rollover notifications
//! ```

use chrono::{DateTime, Utc};

use crate::config::GoalConfig;
use crate::events::{Event, GoalKind};
use crate::goals::GoalTracker;
use crate::metrics::{recompute, Metrics};
use crate::period::Period;

/// Core metrics engine.
///
/// Owns the aggregate [`Metrics`] value and serializes every mutation;
/// handlers run to completion, so [`MetricsEngine::snapshot`] always sees a
/// fully-updated state. The host persists the snapshot after each mutating
/// call.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    metrics: Metrics,
    config: GoalConfig,
    /// Last activated document and its last known line count. Used to
    /// re-seed the baseline after a period rollover.
    active: Option<(String, u64)>,
}

impl MetricsEngine {
    /// Create an engine with a fresh aggregate for the period containing `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            metrics: Metrics::fresh(now),
            config: GoalConfig::default(),
            active: None,
        }
    }

    /// Resume from a persisted snapshot.
    ///
    /// The host should follow up with [`MetricsEngine::set_goals`] and an
    /// initial [`MetricsEngine::document_activated`] for whatever document
    /// has focus; a stale period is then handled by the next tick.
    pub fn from_snapshot(metrics: Metrics) -> Self {
        Self {
            metrics,
            config: GoalConfig::default(),
            active: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Read-only view of the aggregate state.
    pub fn snapshot(&self) -> &Metrics {
        &self.metrics
    }

    pub fn goals(&self) -> &GoalConfig {
        &self.config
    }

    /// The document currently holding focus, if any.
    pub fn active_document(&self) -> Option<&str> {
        self.active.as_ref().map(|(doc, _)| doc.as_str())
    }

    // ── Document events ──────────────────────────────────────────────

    /// The focused document changed. First sight fixes the period baseline.
    pub fn document_activated(&mut self, document_id: &str, line_count: u64) {
        self.active = Some((document_id.to_string(), line_count));
        self.metrics.observe(document_id, line_count);
        recompute(&mut self.metrics);
    }

    /// A tracked document was saved. Updates the current count only; a save
    /// never re-baselines an already-tracked document.
    pub fn document_saved(&mut self, document_id: &str, line_count: u64) {
        self.metrics.observe(document_id, line_count);
        recompute(&mut self.metrics);
        if let Some((active, lines)) = &mut self.active {
            if active == document_id {
                *lines = line_count;
            }
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Push the latest goal configuration. A changed threshold re-arms its
    /// notification latch even mid-period.
    pub fn set_goals(&mut self, config: GoalConfig) {
        self.config = config;
        self.metrics.goals.configure(&self.config);
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Advance the engine by one second of wall-clock time.
    ///
    /// Runs the rollover check before any aggregation, so after a month
    /// boundary the clock advance and goal evaluation operate on the fresh
    /// state. Returns the notifications produced by this tick.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();

        if !self.metrics.period.contains(now) {
            let from = self.metrics.period;
            self.start_period(now);
            events.push(Event::PeriodRolledOver {
                from,
                to: self.metrics.period,
                at: now,
            });
        }

        recompute(&mut self.metrics);
        self.metrics.clock.tick();

        let additions = self.metrics.additions_total;
        let hours = self.metrics.clock.hours as u64;
        for (goal, target) in self.metrics.goals.evaluate(additions, hours) {
            let value = match goal {
                GoalKind::Additions => additions,
                GoalKind::ActiveHours => hours,
            };
            events.push(Event::GoalReached {
                goal,
                target,
                value,
                message: Event::goal_message(goal, target),
                at: now,
            });
        }

        events
    }

    /// Discard all counters and start a fresh period on demand.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.start_period(now);
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Replace the aggregate wholesale: zero counters, empty maps, goal
    /// latches re-armed from configuration, and the focused document
    /// re-baselined at its last known line count.
    fn start_period(&mut self, now: DateTime<Utc>) {
        let mut fresh = Metrics::fresh(now);
        fresh.goals = GoalTracker::armed_from(&self.config);
        if let Some((document, lines)) = &self.active {
            fresh.observe(document, *lines);
        }
        self.metrics = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn may() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 10, 9, 0, 0).unwrap()
    }

    fn june() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn save_after_activate_counts_additions() {
        let mut engine = MetricsEngine::new(may());
        engine.document_activated("a.rs", 50);
        engine.document_saved("a.rs", 70);
        let m = engine.snapshot();
        assert_eq!(m.additions_total, 20);
        assert_eq!(m.deletions_total, 0);
        assert_eq!(m.top_additions[0].document, "a.rs");
        assert!(m.top_deletions.is_empty());
    }

    #[test]
    fn save_never_re_baselines() {
        let mut engine = MetricsEngine::new(may());
        engine.document_activated("a.rs", 50);
        engine.document_saved("a.rs", 70);
        engine.document_saved("a.rs", 65);
        assert_eq!(engine.snapshot().baselines.get("a.rs"), Some(&50));
        assert_eq!(engine.snapshot().additions_total, 15);
    }

    #[test]
    fn goal_notification_fires_once() {
        let mut engine = MetricsEngine::new(may());
        engine.set_goals(GoalConfig {
            monthly_additions: Some(100),
            monthly_hours: None,
        });
        engine.document_activated("a.rs", 0);
        engine.document_saved("a.rs", 99);
        assert!(engine.tick(may()).is_empty());

        engine.document_saved("a.rs", 100);
        let events = engine.tick(may());
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::GoalReached { goal, target, value, .. } => {
                assert_eq!(*goal, GoalKind::Additions);
                assert_eq!(*target, 100);
                assert_eq!(*value, 100);
            }
            other => panic!("Expected GoalReached, got {other:?}"),
        }

        // Latched: further ticks above the threshold stay quiet.
        engine.document_saved("a.rs", 150);
        assert!(engine.tick(may()).is_empty());
        assert!(engine.tick(may()).is_empty());
    }

    #[test]
    fn changed_threshold_re_arms_notification() {
        let mut engine = MetricsEngine::new(may());
        engine.set_goals(GoalConfig {
            monthly_additions: Some(10),
            monthly_hours: None,
        });
        engine.document_activated("a.rs", 0);
        engine.document_saved("a.rs", 20);
        assert_eq!(engine.tick(may()).len(), 1);

        engine.set_goals(GoalConfig {
            monthly_additions: Some(15),
            monthly_hours: None,
        });
        let events = engine.tick(may());
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::GoalReached { target, .. } => assert_eq!(*target, 15),
            other => panic!("Expected GoalReached, got {other:?}"),
        }
    }

    #[test]
    fn hours_goal_uses_session_clock() {
        let mut engine = MetricsEngine::new(may());
        engine.set_goals(GoalConfig {
            monthly_additions: None,
            monthly_hours: Some(1),
        });
        let mut fired = 0;
        for _ in 0..3700 {
            fired += engine.tick(may()).len();
        }
        assert_eq!(fired, 1);
        assert_eq!(engine.snapshot().clock.hours, 1);
    }

    #[test]
    fn month_boundary_resets_and_re_baselines() {
        let mut engine = MetricsEngine::new(may());
        engine.set_goals(GoalConfig {
            monthly_additions: Some(10),
            monthly_hours: None,
        });
        engine.document_activated("a.rs", 50);
        engine.document_saved("a.rs", 90);
        engine.tick(may());
        assert_eq!(engine.snapshot().additions_total, 40);

        let events = engine.tick(june());
        assert!(matches!(events[0], Event::PeriodRolledOver { .. }));

        let m = engine.snapshot();
        assert_eq!(m.period, Period::of(june()));
        assert_eq!(m.additions_total, 0);
        assert_eq!(m.deletions_total, 0);
        assert_eq!(m.clock.total_seconds(), 1); // this tick's second only
        // Active document re-seeded at its post-rollover line count.
        assert_eq!(m.baselines.get("a.rs"), Some(&90));
        assert_eq!(m.net_delta(), 0);
        // Latches cleared: the goal can fire again in the new month.
        engine.document_saved("a.rs", 105);
        assert_eq!(engine.tick(june()).len(), 1);
    }

    #[test]
    fn rollover_goal_check_sees_fresh_totals() {
        let mut engine = MetricsEngine::new(may());
        engine.set_goals(GoalConfig {
            monthly_additions: Some(10),
            monthly_hours: None,
        });
        engine.document_activated("a.rs", 0);
        engine.document_saved("a.rs", 50);
        // Goal not yet evaluated when the month flips: only the rollover
        // event fires, never a goal against the stale 50.
        let events = engine.tick(june());
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::PeriodRolledOver { .. }));
    }

    #[test]
    fn reset_starts_fresh_period() {
        let mut engine = MetricsEngine::new(may());
        engine.document_activated("a.rs", 10);
        engine.document_saved("a.rs", 60);
        engine.tick(may());
        engine.reset(may());
        let m = engine.snapshot();
        assert_eq!(m.additions_total, 0);
        assert_eq!(m.baselines.get("a.rs"), Some(&60));
        assert_eq!(m.clock.total_seconds(), 0);
    }

    #[test]
    fn snapshot_resume_preserves_baselines() {
        let mut engine = MetricsEngine::new(may());
        engine.document_activated("a.rs", 50);
        engine.document_saved("a.rs", 75);
        let saved = engine.snapshot().clone();

        let mut resumed = MetricsEngine::from_snapshot(saved);
        resumed.document_activated("a.rs", 75);
        resumed.tick(may());
        // Baseline survives the restart; no double counting.
        assert_eq!(resumed.snapshot().baselines.get("a.rs"), Some(&50));
        assert_eq!(resumed.snapshot().additions_total, 25);
    }
}
