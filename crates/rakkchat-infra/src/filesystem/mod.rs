//! Data directory layout.
//!
//! Everything rakkchat keeps on disk lives under one directory:
//! `config.toml` and the session store `storage.json`.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "RAKKCHAT_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `RAKKCHAT_DATA_DIR` environment variable
/// 2. `~/.rakkchat`
/// 3. `.rakkchat` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".rakkchat");
    }

    PathBuf::from(".rakkchat")
}
