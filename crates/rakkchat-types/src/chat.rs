//! Chat message, product link, and chat service payload types.
//!
//! `ChatMessage` is what the widget keeps in its transcript and hands to the
//! presentation layer. The `*Request` / `*Response` types mirror the JSON
//! bodies exchanged with the remote chat service.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ChatError;

/// Bot message shown in place of a reply whenever a send fails.
pub const FALLBACK_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Who authored a message in the widget transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
}

/// A recommended product attached to a bot reply.
///
/// Links are passed through as the service sends them: a missing or null
/// field becomes an empty string rather than dropping the link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLink {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

impl ProductLink {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// A single entry in the widget transcript.
///
/// Never mutated after creation; the transcript is rebuilt or cleared in bulk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    /// Recommendations, in service order. Always empty for user messages.
    #[serde(default)]
    pub product_links: Vec<ProductLink>,
}

impl ChatMessage {
    /// A message typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            product_links: Vec::new(),
        }
    }

    /// A bot reply with its (possibly empty) recommendations.
    pub fn bot(content: impl Into<String>, product_links: Vec<ProductLink>) -> Self {
        Self {
            role: MessageRole::Bot,
            content: content.into(),
            product_links,
        }
    }

    /// The canned bot message appended when a send fails.
    pub fn fallback() -> Self {
        Self::bot(FALLBACK_MESSAGE, Vec::new())
    }

    pub fn is_bot(&self) -> bool {
        self.role == MessageRole::Bot
    }
}

/// One persisted user/bot exchange as returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub user_message: String,
    pub bot_response: String,
    /// JSON-encoded array of `{url, name}`; null when the reply had no links.
    #[serde(default)]
    pub product_links: Option<String>,
}

/// Body of `GET /chat/history/{session_id}`.
///
/// The service answers `{ "error": ... }` instead of `{ "history": [...] }`
/// when it cannot read the history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Option<Vec<HistoryRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HistoryResponse {
    /// Extract the records (most recent first), turning an error payload
    /// or a missing `history` field into a [`ChatError::Service`].
    pub fn into_records(self) -> Result<Vec<HistoryRecord>, ChatError> {
        if let Some(error) = self.error {
            return Err(ChatError::Service(error));
        }
        self.history
            .ok_or_else(|| ChatError::Service("history missing from response".to_string()))
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_links: Vec<ProductLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    /// Interpret the payload: an `error` field wins over everything else,
    /// and a payload without `response` text cannot be displayed.
    pub fn into_reply(self) -> Result<BotReply, ChatError> {
        if let Some(error) = self.error {
            return Err(ChatError::Service(error));
        }
        let text = self
            .response
            .ok_or_else(|| ChatError::Parse("response text missing from payload".to_string()))?;
        Ok(BotReply {
            text,
            product_links: self.product_links,
        })
    }
}

/// Body of the logout request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub session_id: String,
}

/// A successful bot reply, ready to append to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub text: String,
    pub product_links: Vec<ProductLink>,
}

impl From<BotReply> for ChatMessage {
    fn from(reply: BotReply) -> Self {
        ChatMessage::bot(reply.text, reply.product_links)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
