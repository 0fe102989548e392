mod store;

pub use store::MetricsStore;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/linepulse[-dev]/` based on LINEPULSE_ENV.
///
/// Set LINEPULSE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LINEPULSE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("linepulse-dev")
    } else {
        base_dir.join("linepulse")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
