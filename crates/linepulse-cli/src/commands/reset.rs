use chrono::Utc;
use linepulse_core::{MetricsEngine, MetricsStore};

/// Start a fresh period now, discarding all counters.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = MetricsStore::open()?;
    let mut engine = match store.load()? {
        Some(metrics) => MetricsEngine::from_snapshot(metrics),
        None => MetricsEngine::new(Utc::now()),
    };
    engine.reset(Utc::now());
    store.save(engine.snapshot())?;
    println!("ok");
    Ok(())
}
