//! One-shot session commands: send, history, logout, session.
//!
//! Each command builds a fresh widget over the persisted session, performs
//! a single operation, and prints the outcome as styled text or `--json`.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use rakkchat_types::event::SessionSignal;

use crate::state::AppState;

use super::chat::renderer::ChatRenderer;

/// Send one message and print the reply.
pub async fn send(state: &AppState, text: &str, json: bool) -> anyhow::Result<()> {
    let mut widget = state.widget()?;

    let spinner = (!json).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) =
            ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(spinner_style);
        }
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    });

    let reply = widget.send_message(text).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let Some(reply) = reply else {
        anyhow::bail!("Nothing to send: the message is empty");
    };

    if json {
        let session_id = widget.session_id().await;
        let out = serde_json::json!({
            "session_id": session_id,
            "reply": reply,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", ChatRenderer::new(state.config.title.clone()).render_message(&reply));
    }
    Ok(())
}

/// Load and print the conversation history.
pub async fn history(state: &AppState, json: bool) -> anyhow::Result<()> {
    let mut widget = state.widget()?;
    widget
        .load_history()
        .await
        .map_err(|e| anyhow::anyhow!("Could not load history: {e}"))?;

    if json {
        let session_id = widget.session_id().await;
        let out = serde_json::json!({
            "session_id": session_id,
            "messages": widget.messages(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        print!(
            "{}",
            ChatRenderer::new(state.config.title.clone()).render_transcript(widget.messages())
        );
    }
    Ok(())
}

/// Raise the logout notification and report what was cleared.
pub async fn logout(state: &AppState, json: bool) -> anyhow::Result<()> {
    let mut widget = state.widget()?;
    let mut signals = state.signals.subscribe();
    let previous = widget.persisted_session_id().await;

    state.signals.publish(SessionSignal::UserLoggedOut);
    let signal = signals.recv().await?;
    widget.handle_signal(signal).await;

    if json {
        let out = serde_json::json!({
            "logged_out": previous.is_some(),
            "session_id": previous,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match previous {
        Some(id) => println!(
            "  {} Signed out of session {}",
            style("✓").green(),
            style(id).dim()
        ),
        None => println!("  {}", style("No active session.").dim()),
    }
    Ok(())
}

/// Print the current session identifier, creating one if needed.
pub async fn show_session(state: &AppState, json: bool) -> anyhow::Result<()> {
    let mut widget = state.widget()?;
    let session_id = widget.session_id().await;

    if json {
        let out = serde_json::json!({
            "session_id": session_id,
            "storage": state.session_store().path(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{session_id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rakkchat_core::storage::SessionStore;
    use tempfile::TempDir;

    /// Nothing listens on the discard port, so every request fails fast.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    async fn offline_state(tmp: &TempDir) -> AppState {
        AppState::with_data_dir(tmp.path().to_path_buf(), Some(UNREACHABLE.to_string()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_show_session_creates_and_persists_id() {
        let tmp = TempDir::new().unwrap();
        let state = offline_state(&tmp).await;

        show_session(&state, true).await.unwrap();

        let stored = state.session_store().get("chatSessionId").await.unwrap();
        assert!(stored.unwrap().starts_with("session_"));
    }

    #[tokio::test]
    async fn test_logout_forgets_session_when_service_is_down() {
        let tmp = TempDir::new().unwrap();
        let state = offline_state(&tmp).await;
        state
            .session_store()
            .set("chatSessionId", "session_1_abcdefghi")
            .await
            .unwrap();

        logout(&state, true).await.unwrap();

        assert_eq!(state.session_store().get("chatSessionId").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_without_session_is_ok() {
        let tmp = TempDir::new().unwrap();
        let state = offline_state(&tmp).await;

        logout(&state, false).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_blank_text_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let state = offline_state(&tmp).await;

        assert!(send(&state, "   ", true).await.is_err());
        assert_eq!(state.session_store().get("chatSessionId").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_send_to_unreachable_service_prints_fallback() {
        let tmp = TempDir::new().unwrap();
        let state = offline_state(&tmp).await;

        send(&state, "show me jackets", true).await.unwrap();
    }

    #[tokio::test]
    async fn test_history_from_unreachable_service_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let state = offline_state(&tmp).await;

        assert!(history(&state, true).await.is_err());
    }
}
