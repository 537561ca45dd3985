//! ChatBackend trait definition.
//!
//! The three calls the widget makes against the remote chat service. The
//! HTTP implementation lives in rakkchat-infra.

use rakkchat_types::chat::{BotReply, HistoryRecord};
use rakkchat_types::error::ChatError;

/// Port to the remote chat service.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ChatBackend: Send + Sync {
    /// Fetch the persisted exchanges for a session, most recent first.
    fn fetch_history(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<HistoryRecord>, ChatError>> + Send;

    /// Submit a user message and wait for the bot's reply.
    ///
    /// A payload carrying an `error` field must come back as
    /// [`ChatError::Service`], not as a reply.
    fn send_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> impl std::future::Future<Output = Result<BotReply, ChatError>> + Send;

    /// Ask the service to delete all persisted history for a session.
    fn clear_history(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), ChatError>> + Send;
}
