//! Replay a recorded session script through the engine.
//!
//! A script is a JSON array of steps, driving the engine through the same
//! public inputs an editor host would use:
//!
//! ```json
//! [
//!   { "event": "activate", "document": "src/main.rs", "lines": 120 },
//!   { "event": "save", "document": "src/main.rs", "lines": 140 },
//!   { "event": "tick", "count": 61 }
//! ]
//! ```

use std::path::Path;

use chrono::Utc;
use linepulse_core::{Event, GoalConfig, MetricsEngine, MetricsStore};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum ReplayStep {
    /// The focused document changed.
    Activate { document: String, lines: u64 },
    /// A document was saved.
    Save { document: String, lines: u64 },
    /// Advance the clock, default one second.
    Tick {
        #[serde(default = "default_tick_count")]
        count: u32,
    },
}

fn default_tick_count() -> u32 {
    1
}

pub fn run(script: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(script)?;
    let steps: Vec<ReplayStep> = serde_json::from_str(&content)?;

    let store = MetricsStore::open()?;
    let mut engine = match store.load()? {
        Some(metrics) => MetricsEngine::from_snapshot(metrics),
        None => MetricsEngine::new(Utc::now()),
    };
    engine.set_goals(GoalConfig::load_or_default());

    let mut notifications: Vec<Event> = Vec::new();
    for step in steps {
        match step {
            ReplayStep::Activate { document, lines } => {
                engine.document_activated(&document, lines);
            }
            ReplayStep::Save { document, lines } => {
                engine.document_saved(&document, lines);
            }
            ReplayStep::Tick { count } => {
                for _ in 0..count {
                    notifications.extend(engine.tick(Utc::now()));
                }
            }
        }
        store.save(engine.snapshot())?;
    }

    for event in &notifications {
        match event {
            Event::GoalReached { message, .. } => println!("* {message}"),
            Event::PeriodRolledOver { from, to, .. } => {
                println!("* Period rolled over: {from} -> {to}");
            }
        }
    }
    println!("{}", serde_json::to_string_pretty(engine.snapshot())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_parses() {
        let json = r#"[
            { "event": "activate", "document": "a.rs", "lines": 50 },
            { "event": "save", "document": "a.rs", "lines": 70 },
            { "event": "tick", "count": 61 },
            { "event": "tick" }
        ]"#;
        let steps: Vec<ReplayStep> = serde_json::from_str(json).unwrap();
        assert_eq!(steps.len(), 4);
        assert!(matches!(steps[2], ReplayStep::Tick { count: 61 }));
        assert!(matches!(steps[3], ReplayStep::Tick { count: 1 }));
    }
}
