//! Event types for the widget event buses.
//!
//! `WidgetEvent` flows from the widget core to the presentation layer every
//! time the transcript or panel state changes. `SessionSignal` flows the other
//! way: page-level notifications the widget reacts to. Both are Clone + Send
//! for use with tokio broadcast channels.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Transcript and panel changes published by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// The transcript was rebuilt from freshly fetched history.
    HistoryReplaced { messages: Vec<ChatMessage> },

    /// A single message was appended to the transcript.
    MessageAppended { message: ChatMessage },

    /// The transcript was emptied (logout).
    TranscriptCleared,

    /// The panel was opened or closed.
    PanelToggled { open: bool },
}

/// Notifications raised outside the widget that it must react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionSignal {
    /// The host application's user session ended.
    UserLoggedOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_event_serde_tag() {
        let event = WidgetEvent::PanelToggled { open: true };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"panel_toggled","open":true}"#);
    }

    #[test]
    fn test_session_signal_serde_tag() {
        let json = serde_json::to_string(&SessionSignal::UserLoggedOut).unwrap();
        assert_eq!(json, r#"{"type":"user_logged_out"}"#);
    }
}
