//! Widget configuration types.
//!
//! `WidgetConfig` represents the `config.toml` in the data directory. Every
//! field has a default, so an empty or missing file yields a working widget
//! pointed at a local chat service.

use serde::{Deserialize, Serialize};

/// Path of the history-clearing endpoint, relative to the service URL.
pub const DEFAULT_LOGOUT_PATH: &str = "/api/chat/logout";

/// Top-level configuration for the chat widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Base URL of the chat service (`/chat`, `/chat/history/{id}` live under it).
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Full URL of the logout endpoint. Defaults to
    /// `{service_url}/api/chat/logout` when unset.
    #[serde(default)]
    pub logout_url: Option<String>,

    /// Upper bound on any single request to the chat service.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Key under which the session identifier is persisted.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Title shown in the panel header.
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_service_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_storage_key() -> String {
    "chatSessionId".to_string()
}

fn default_title() -> String {
    "RakkGears Assistant".to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            logout_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            storage_key: default_storage_key(),
            title: default_title(),
        }
    }
}

impl WidgetConfig {
    /// The logout endpoint, falling back to the service URL plus
    /// [`DEFAULT_LOGOUT_PATH`].
    pub fn resolved_logout_url(&self) -> String {
        match &self.logout_url {
            Some(url) => url.clone(),
            None => format!(
                "{}{}",
                self.service_url.trim_end_matches('/'),
                DEFAULT_LOGOUT_PATH
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_config_default_values() {
        let config = WidgetConfig::default();
        assert_eq!(config.service_url, "http://localhost:5000");
        assert_eq!(config.storage_key, "chatSessionId");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.logout_url.is_none());
    }

    #[test]
    fn test_widget_config_deserialize_with_defaults() {
        let config: WidgetConfig = toml::from_str("").unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_widget_config_deserialize_with_values() {
        let toml_str = r#"
service_url = "https://shop.example.com/"
logout_url = "https://shop.example.com/account/chat/logout"
request_timeout_secs = 5
"#;
        let config: WidgetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service_url, "https://shop.example.com/");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.title, "RakkGears Assistant");
        assert_eq!(
            config.resolved_logout_url(),
            "https://shop.example.com/account/chat/logout"
        );
    }

    #[test]
    fn test_resolved_logout_url_default() {
        let config = WidgetConfig {
            service_url: "http://localhost:5000/".to_string(),
            ..WidgetConfig::default()
        };
        assert_eq!(
            config.resolved_logout_url(),
            "http://localhost:5000/api/chat/logout"
        );
    }
}
