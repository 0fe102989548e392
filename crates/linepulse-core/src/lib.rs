//! # Linepulse Core Library
//!
//! This library provides the core business logic for Linepulse, a
//! developer-activity metrics tracker. It implements a host-agnostic
//! philosophy where the engine is driven entirely through function calls:
//! an editor extension, a CLI replay harness, or a test can all feed it the
//! same document events and clock ticks.
//!
//! ## Architecture
//!
//! - **Metrics Engine**: a caller-driven state machine that receives
//!   document events and requires the host to periodically invoke `tick()`
//! - **Metrics**: the single aggregate value tracking per-file baselines,
//!   churn totals, rankings and active time for one calendar month
//! - **Goals**: monthly targets with one-shot notification latches
//! - **Storage**: SQLite-based snapshot persistence and TOML-based
//!   goal configuration
//!
//! ## Key Components
//!
//! - [`MetricsEngine`]: event handling, tick pipeline, period rollover
//! - [`Metrics`]: the aggregate state, persisted across restarts
//! - [`MetricsStore`]: snapshot persistence
//! - [`GoalConfig`]: configured monthly targets

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod goals;
pub mod metrics;
pub mod period;
pub mod storage;

pub use config::GoalConfig;
pub use engine::MetricsEngine;
pub use error::{ConfigError, CoreError, StorageError};
pub use events::{Event, GoalKind};
pub use goals::{GoalState, GoalTracker};
pub use metrics::{FileChurn, Metrics, SessionClock};
pub use period::Period;
pub use storage::MetricsStore;
