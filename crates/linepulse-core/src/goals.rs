//! Monthly goal latches.
//!
//! Each goal is a small state machine rather than an ad-hoc boolean:
//!
//! ```text
//! Unset -> Armed      when a threshold is configured
//! Armed -> Reached    when the metric first meets the threshold
//!                     (the notification fires on this transition only)
//! Reached -> Armed    when the configured threshold changes
//! any -> fresh        on period rollover
//! ```

use serde::{Deserialize, Serialize};

use crate::config::GoalConfig;
use crate::events::GoalKind;

/// Latch state for one goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum GoalState {
    /// No threshold configured.
    #[default]
    Unset,
    /// Threshold configured, notification not yet fired this period.
    Armed { target: u64 },
    /// Threshold met and notification fired; holds until re-armed.
    Reached { target: u64 },
}

impl GoalState {
    pub fn target(&self) -> Option<u64> {
        match self {
            GoalState::Unset => None,
            GoalState::Armed { target } | GoalState::Reached { target } => Some(*target),
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, GoalState::Reached { .. })
    }

    /// Apply a configured threshold. A changed target re-arms the latch
    /// even mid-period; an unchanged one leaves the latch alone so a
    /// reached goal stays quiet.
    fn configure(&mut self, threshold: Option<u64>) {
        match threshold {
            None => *self = GoalState::Unset,
            Some(target) if self.target() != Some(target) => {
                *self = GoalState::Armed { target };
            }
            Some(_) => {}
        }
    }

    /// Trip the latch when the metric meets the target. Returns the target
    /// on the arming-to-reached transition, `None` otherwise.
    fn evaluate(&mut self, value: u64) -> Option<u64> {
        if let GoalState::Armed { target } = *self {
            if value >= target {
                *self = GoalState::Reached { target };
                return Some(target);
            }
        }
        None
    }
}

/// Both monthly goals: net line additions and active hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTracker {
    #[serde(default)]
    pub additions: GoalState,
    #[serde(default)]
    pub hours: GoalState,
}

impl GoalTracker {
    /// A tracker armed from configuration, as built at period start.
    pub fn armed_from(config: &GoalConfig) -> Self {
        let mut tracker = Self::default();
        tracker.additions.configure(config.additions_target());
        tracker.hours.configure(config.hours_target());
        tracker
    }

    /// Refresh thresholds from configuration, re-arming any changed goal.
    pub fn configure(&mut self, config: &GoalConfig) {
        self.additions.configure(config.additions_target());
        self.hours.configure(config.hours_target());
    }

    /// Evaluate both goals against the current metrics. Returns the
    /// (kind, target) pair for each goal that tripped on this call.
    pub fn evaluate(&mut self, additions_total: u64, elapsed_hours: u64) -> Vec<(GoalKind, u64)> {
        let mut tripped = Vec::new();
        if let Some(target) = self.additions.evaluate(additions_total) {
            tripped.push((GoalKind::Additions, target));
        }
        if let Some(target) = self.hours.evaluate(elapsed_hours) {
            tripped.push((GoalKind::ActiveHours, target));
        }
        tripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(additions: Option<i64>, hours: Option<i64>) -> GoalConfig {
        GoalConfig {
            monthly_additions: additions,
            monthly_hours: hours,
        }
    }

    #[test]
    fn unset_goal_never_trips() {
        let mut tracker = GoalTracker::default();
        assert!(tracker.evaluate(10_000, 100).is_empty());
    }

    #[test]
    fn goal_trips_once() {
        let mut tracker = GoalTracker::armed_from(&config(Some(100), None));
        assert!(tracker.evaluate(99, 0).is_empty());
        let tripped = tracker.evaluate(100, 0);
        assert_eq!(tripped, vec![(GoalKind::Additions, 100)]);
        // Latched: repeated evaluation stays quiet.
        assert!(tracker.evaluate(100, 0).is_empty());
        assert!(tracker.evaluate(250, 0).is_empty());
    }

    #[test]
    fn changing_target_re_arms() {
        let mut tracker = GoalTracker::armed_from(&config(Some(100), None));
        tracker.evaluate(150, 0);
        assert!(tracker.additions.is_reached());
        tracker.configure(&config(Some(200), None));
        assert_eq!(tracker.additions, GoalState::Armed { target: 200 });
        assert_eq!(tracker.evaluate(200, 0), vec![(GoalKind::Additions, 200)]);
    }

    #[test]
    fn unchanged_target_keeps_latch() {
        let mut tracker = GoalTracker::armed_from(&config(Some(100), None));
        tracker.evaluate(150, 0);
        tracker.configure(&config(Some(100), None));
        assert!(tracker.additions.is_reached());
    }

    #[test]
    fn clearing_target_unsets() {
        let mut tracker = GoalTracker::armed_from(&config(Some(100), Some(2)));
        tracker.configure(&config(None, Some(2)));
        assert_eq!(tracker.additions, GoalState::Unset);
        assert_eq!(tracker.hours, GoalState::Armed { target: 2 });
    }

    #[test]
    fn both_goals_can_trip_in_one_pass() {
        let mut tracker = GoalTracker::armed_from(&config(Some(50), Some(1)));
        let tripped = tracker.evaluate(60, 1);
        assert_eq!(
            tripped,
            vec![(GoalKind::Additions, 50), (GoalKind::ActiveHours, 1)]
        );
    }
}
