//! Widget configuration loader.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`WidgetConfig`]. A missing or malformed file never stops the widget:
//! it falls back to defaults.

use std::path::{Path, PathBuf};

use rakkchat_types::config::WidgetConfig;

/// File name of the configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Path of the configuration file for `data_dir`.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Load widget configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`WidgetConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
pub async fn load_widget_config(data_dir: &Path) -> WidgetConfig {
    let config_path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return WidgetConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return WidgetConfig::default();
        }
    };

    match toml::from_str::<WidgetConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            WidgetConfig::default()
        }
    }
}
