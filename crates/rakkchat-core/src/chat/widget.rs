//! The chat widget: session lifecycle, history sync, messaging, and logout.
//!
//! `ChatWidget` owns the transcript and the session identity, talks to the
//! chat service through a [`ChatBackend`], and announces every change on an
//! [`EventBus`] so the presentation layer can re-render. It never renders
//! anything itself.
//!
//! All operations take `&mut self`, so only one request is ever in flight
//! per widget and replies are appended in the order messages were sent.

use rakkchat_types::chat::ChatMessage;
use rakkchat_types::error::ChatError;
use rakkchat_types::event::{SessionSignal, WidgetEvent};
use tracing::{debug, error, info, warn};

use crate::chat::backend::ChatBackend;
use crate::chat::history::expand_records;
use crate::chat::transcript::Transcript;
use crate::event::EventBus;
use crate::session::SessionIdentity;
use crate::storage::SessionStore;

/// A chat widget instance with injected storage, transport, and event bus.
///
/// Generic over `SessionStore` and `ChatBackend` to maintain clean
/// architecture (rakkchat-core never depends on rakkchat-infra).
pub struct ChatWidget<S: SessionStore, B: ChatBackend> {
    identity: SessionIdentity<S>,
    backend: B,
    transcript: Transcript,
    events: EventBus<WidgetEvent>,
    is_open: bool,
}

impl<S: SessionStore, B: ChatBackend> ChatWidget<S, B> {
    /// Assemble a widget without touching storage or the network.
    ///
    /// The panel starts closed with an empty transcript.
    pub fn new(
        store: S,
        backend: B,
        events: EventBus<WidgetEvent>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            identity: SessionIdentity::new(store, storage_key),
            backend,
            transcript: Transcript::new(),
            events,
            is_open: false,
        }
    }

    /// Assemble a widget, establish its session identifier, and load history.
    ///
    /// A failed history load is logged and leaves the transcript empty.
    pub async fn init(
        store: S,
        backend: B,
        events: EventBus<WidgetEvent>,
        storage_key: impl Into<String>,
    ) -> Self {
        let mut widget = Self::new(store, backend, events, storage_key);
        let session_id = widget.session_id().await;
        debug!(session_id = %session_id, "Chat widget initialized");
        let _ = widget.load_history().await;
        widget
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    pub fn events(&self) -> &EventBus<WidgetEvent> {
        &self.events
    }

    /// The current session identifier, generated and persisted on first use.
    pub async fn session_id(&mut self) -> String {
        self.identity.get_or_create().await
    }

    /// The persisted session identifier, if any, without generating one.
    pub async fn persisted_session_id(&self) -> Option<String> {
        self.identity.persisted().await
    }

    // --- History ---

    /// Re-synchronize the transcript with the service.
    ///
    /// On success the transcript is fully replaced (never merged) and the
    /// number of messages is returned. On failure the transcript is left as
    /// it was; the error is logged here and returned for callers that want
    /// it, but nothing is added to the conversation.
    pub async fn load_history(&mut self) -> Result<usize, ChatError> {
        let session_id = self.session_id().await;

        match self.backend.fetch_history(&session_id).await {
            Ok(records) => {
                let messages = expand_records(records);
                let count = messages.len();
                self.transcript.replace(messages.clone());
                self.events.publish(WidgetEvent::HistoryReplaced { messages });
                debug!(session_id = %session_id, count, "Chat history loaded");
                Ok(count)
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Failed to load chat history");
                Err(e)
            }
        }
    }

    // --- Panel ---

    /// Open the panel. A closed->open transition re-synchronizes history.
    ///
    /// Returns `false` if the panel was already open.
    pub async fn open(&mut self) -> bool {
        if self.is_open {
            return false;
        }
        self.is_open = true;
        self.events.publish(WidgetEvent::PanelToggled { open: true });
        let _ = self.load_history().await;
        true
    }

    /// Close the panel. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        self.events.publish(WidgetEvent::PanelToggled { open: false });
        true
    }

    /// Flip the panel state, returning whether it is now open.
    pub async fn toggle(&mut self) -> bool {
        if self.is_open {
            self.close();
        } else {
            self.open().await;
        }
        self.is_open
    }

    // --- Messaging ---

    /// Send a message typed by the user.
    ///
    /// Whitespace-only input is ignored: nothing is appended and no request
    /// is made (`None`). Otherwise the trimmed text is appended as a user
    /// message before the request goes out, and exactly one bot message
    /// follows: the reply, or the fallback message if the request failed.
    /// The appended bot message is returned.
    pub async fn send_message(&mut self, text: &str) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.append(ChatMessage::user(text));
        let session_id = self.session_id().await;

        let reply = match self.backend.send_message(&session_id, text).await {
            Ok(reply) => {
                debug!(
                    session_id = %session_id,
                    links = reply.product_links.len(),
                    "Received bot reply"
                );
                ChatMessage::from(reply)
            }
            Err(e) => {
                error!(session_id = %session_id, error = %e, "Failed to send chat message");
                ChatMessage::fallback()
            }
        };

        self.append(reply.clone());
        Some(reply)
    }

    // --- Logout ---

    /// React to the host application's user logging out.
    ///
    /// With a session identifier (the persisted one, or the in-memory one
    /// used while storage is unreadable): asks the service to delete the
    /// session's history, then, whatever the outcome of that request, forgets
    /// the identifier and empties the transcript. Returns `true` in that case.
    /// Without any identifier this is a no-op returning `false`.
    pub async fn handle_logout(&mut self) -> bool {
        let session_id = match self.identity.persisted().await {
            Some(id) => id,
            // The store may be unreadable while an in-memory id is in use.
            None => match self.identity.cached() {
                Some(id) => id.to_string(),
                None => {
                    debug!("Logout with no session id; nothing to clear");
                    return false;
                }
            },
        };

        match self.backend.clear_history(&session_id).await {
            Ok(()) => info!(session_id = %session_id, "Server-side chat history cleared"),
            Err(e) => error!(session_id = %session_id, error = %e, "Failed to clear chat history"),
        }

        self.identity.clear().await;
        self.transcript.clear();
        self.events.publish(WidgetEvent::TranscriptCleared);
        true
    }

    /// Dispatch a page-level notification.
    pub async fn handle_signal(&mut self, signal: SessionSignal) {
        match signal {
            SessionSignal::UserLoggedOut => {
                self.handle_logout().await;
            }
        }
    }

    fn append(&mut self, message: ChatMessage) {
        self.transcript.push(message.clone());
        self.events.publish(WidgetEvent::MessageAppended { message });
    }
}
