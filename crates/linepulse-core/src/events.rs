use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::period::Period;

/// Which monthly goal a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Additions,
    ActiveHours,
}

/// Notifications produced by the engine for the host to surface.
/// The host drains these after each mutating call; none is ever emitted
/// twice for the same transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A monthly goal was met for the first time this period.
    GoalReached {
        goal: GoalKind,
        target: u64,
        value: u64,
        message: String,
        at: DateTime<Utc>,
    },
    /// The calendar month changed; all counters were reset.
    PeriodRolledOver {
        from: Period,
        to: Period,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The fixed user-facing message for a goal-reached notification.
    pub(crate) fn goal_message(goal: GoalKind, target: u64) -> String {
        match goal {
            GoalKind::Additions => {
                format!("Monthly goal reached: {target} lines added!")
            }
            GoalKind::ActiveHours => {
                format!("Monthly goal reached: {target} hours of active coding!")
            }
        }
    }
}
