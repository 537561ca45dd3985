//! HTTP client for the remote chat service.
//!
//! [`HttpChatBackend`] implements [`ChatBackend`] over reqwest:
//!
//! - `GET  {service_url}/chat/history/{session_id}`
//! - `POST {service_url}/chat` with `{ message, session_id }`
//! - `POST {logout_url}` with `{ session_id }`
//!
//! The service answers errors as `{ "error": "..." }` bodies, often with a
//! non-2xx status. Bodies are decoded regardless of status so the service's
//! own error text wins over a bare status code.

use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use rakkchat_core::chat::backend::ChatBackend;
use rakkchat_types::chat::{
    BotReply, ChatRequest, ChatResponse, HistoryRecord, HistoryResponse, LogoutRequest,
};
use rakkchat_types::config::WidgetConfig;
use rakkchat_types::error::ChatError;

/// reqwest-backed [`ChatBackend`].
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    service_url: Url,
    logout_url: Url,
}

impl HttpChatBackend {
    /// Build a client for the endpoints named in `config`.
    ///
    /// Fails if either URL does not parse or cannot carry a path.
    pub fn new(config: &WidgetConfig) -> anyhow::Result<Self> {
        let service_url = Url::parse(&config.service_url)
            .with_context(|| format!("invalid service_url '{}'", config.service_url))?;
        if service_url.cannot_be_a_base() {
            bail!("service_url '{}' cannot carry a path", config.service_url);
        }

        let logout = config.resolved_logout_url();
        let logout_url =
            Url::parse(&logout).with_context(|| format!("invalid logout_url '{logout}'"))?;

        let mut builder = reqwest::Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder.build().context("failed to create HTTP client")?;

        Ok(Self {
            client,
            service_url,
            logout_url,
        })
    }

    /// `{service_url}/chat/history/{session_id}`, with the id percent-encoded.
    pub fn history_url(&self, session_id: &str) -> Url {
        self.endpoint(&["chat", "history", session_id])
    }

    /// `{service_url}/chat`.
    pub fn chat_url(&self) -> Url {
        self.endpoint(&["chat"])
    }

    pub fn logout_url(&self) -> &Url {
        &self.logout_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.service_url.clone();
        // Checked in `new`: the service URL can be a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl ChatBackend for HttpChatBackend {
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<HistoryRecord>, ChatError> {
        let response = self
            .client
            .get(self.history_url(session_id))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        let payload: HistoryResponse = decode(status, &body)?;
        tracing::debug!(%status, "History response received");
        payload.into_records()
    }

    async fn send_message(&self, session_id: &str, message: &str) -> Result<BotReply, ChatError> {
        let request = ChatRequest {
            message: message.to_string(),
            session_id: session_id.to_string(),
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        let payload: ChatResponse = decode(status, &body)?;

        if payload.error.is_none() && !status.is_success() {
            return Err(ChatError::Service(format!("chat request failed with {status}")));
        }
        payload.into_reply()
    }

    async fn clear_history(&self, session_id: &str) -> Result<(), ChatError> {
        let request = LogoutRequest {
            session_id: session_id.to_string(),
        };

        let response = self
            .client
            .post(self.logout_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Service(format!("logout request failed with {status}")));
        }
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> ChatError {
    ChatError::Transport(err.to_string())
}

/// Decode a JSON body. An undecodable body is a parse error on a 2xx and a
/// service error otherwise (proxies answer 502 with HTML, for instance).
fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ChatError> {
    serde_json::from_str(body).map_err(|e| {
        if status.is_success() {
            ChatError::Parse(e.to_string())
        } else {
            ChatError::Service(format!("request failed with {status}"))
        }
    })
}
