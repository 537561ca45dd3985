//! Application state wiring the widget to its concrete adapters.
//!
//! `ChatWidget` is generic over its store and backend; AppState pins it to
//! the file-backed store and the reqwest client, and owns the two buses the
//! presentation layer talks over.

use std::path::PathBuf;

use rakkchat_core::chat::ChatWidget;
use rakkchat_core::event::EventBus;
use rakkchat_infra::config::load_widget_config;
use rakkchat_infra::filesystem::resolve_data_dir;
use rakkchat_infra::http::HttpChatBackend;
use rakkchat_infra::storage::FileSessionStore;
use rakkchat_types::config::WidgetConfig;
use rakkchat_types::event::{SessionSignal, WidgetEvent};

/// Concrete widget type used by every command.
pub type ConcreteChatWidget = ChatWidget<FileSessionStore, HttpChatBackend>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: WidgetConfig,
    pub data_dir: PathBuf,
    /// Page-level notifications (logout) delivered to the widget.
    pub signals: EventBus<SessionSignal>,
    /// Transcript and panel changes published by the widget.
    pub widget_events: EventBus<WidgetEvent>,
}

impl AppState {
    /// Resolve the data directory, load config, and apply CLI overrides.
    pub async fn init(service_url: Option<String>) -> anyhow::Result<Self> {
        Self::with_data_dir(resolve_data_dir(), service_url).await
    }

    pub async fn with_data_dir(
        data_dir: PathBuf,
        service_url: Option<String>,
    ) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut config = load_widget_config(&data_dir).await;
        if let Some(url) = service_url {
            config.service_url = url;
        }
        tracing::debug!(
            data_dir = %data_dir.display(),
            service_url = %config.service_url,
            "Application state initialized"
        );

        Ok(Self {
            config,
            data_dir,
            signals: EventBus::default(),
            widget_events: EventBus::default(),
        })
    }

    pub fn session_store(&self) -> FileSessionStore {
        FileSessionStore::in_data_dir(&self.data_dir)
    }

    /// A widget with no I/O performed yet.
    pub fn widget(&self) -> anyhow::Result<ConcreteChatWidget> {
        Ok(ChatWidget::new(
            self.session_store(),
            HttpChatBackend::new(&self.config)?,
            self.widget_events.clone(),
            self.config.storage_key.clone(),
        ))
    }

    /// A widget with its session established and history loaded.
    pub async fn init_widget(&self) -> anyhow::Result<ConcreteChatWidget> {
        Ok(ChatWidget::init(
            self.session_store(),
            HttpChatBackend::new(&self.config)?,
            self.widget_events.clone(),
            self.config.storage_key.clone(),
        )
        .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_service_url_override_wins_over_config() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "service_url = \"https://from-config.example.com\"\n",
        )
        .await
        .unwrap();

        let state = AppState::with_data_dir(
            tmp.path().to_path_buf(),
            Some("http://127.0.0.1:9".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(state.config.service_url, "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn test_missing_data_dir_is_created() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("profile");

        let state = AppState::with_data_dir(data_dir.clone(), None).await.unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(state.config, WidgetConfig::default());
        assert_eq!(state.session_store().path(), data_dir.join("storage.json"));
    }

    #[tokio::test]
    async fn test_widget_rejects_unparseable_service_url() {
        let tmp = TempDir::new().unwrap();
        let state = AppState::with_data_dir(tmp.path().to_path_buf(), Some("not a url".to_string()))
            .await
            .unwrap();

        assert!(state.widget().is_err());
    }
}
