//! Main chat loop orchestration.
//!
//! Establishes the session, opens the panel, then waits on two sources at
//! once: lines typed at the prompt and session signals from the signal bus.
//! Every widget change arrives as a `WidgetEvent` and is printed through
//! the panel view, so the loop itself never formats transcript content.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{info, warn};

use rakkchat_types::event::{SessionSignal, WidgetEvent};

use crate::state::{AppState, ConcreteChatWidget};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ChatRenderer, PanelView};

/// Run the interactive chat panel until the user exits.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let mut events = state.widget_events.subscribe();
    let mut signals = state.signals.subscribe();

    let mut widget = state.init_widget().await?;
    let session_id = widget.session_id().await;
    print_welcome_banner(&state.config.title, &state.config.service_url, &session_id);

    let mut view = PanelView::new(ChatRenderer::new(state.config.title.clone()));
    widget.open().await;
    drain_events(&mut events, &mut view);

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        tokio::select! {
            signal = signals.recv() => {
                match signal {
                    Ok(signal) => handle_signal(&mut widget, signal).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Session signals dropped");
                    }
                    Err(RecvError::Closed) => {}
                }
            }
            event = chat_input.read_line() => {
                match event {
                    InputEvent::Eof => {
                        println!("\n  {}", style("Session ended.").dim());
                        break;
                    }
                    InputEvent::Interrupted => {
                        println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                    }
                    InputEvent::Message(text) if text.is_empty() => {}
                    InputEvent::Message(text) => {
                        if let Some(cmd) = commands::parse(&text) {
                            if run_command(cmd, state, &mut widget, &mut chat_input).await {
                                break;
                            }
                        } else {
                            send_with_spinner(&mut widget, &text).await;
                        }
                    }
                }
            }
        }

        drain_events(&mut events, &mut view);
    }

    chat_input.flush();
    Ok(())
}

/// Execute a slash command. Returns `true` when the loop should stop.
async fn run_command(
    cmd: ChatCommand,
    state: &AppState,
    widget: &mut ConcreteChatWidget,
    chat_input: &mut ChatInput,
) -> bool {
    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Clear => chat_input.clear(),
        ChatCommand::Exit => {
            println!("\n  {}", style("Session ended.").dim());
            return true;
        }
        ChatCommand::Open => {
            if !widget.open().await {
                println!("  {}", style("Panel is already open.").dim());
            }
        }
        ChatCommand::Close => {
            widget.close();
        }
        ChatCommand::Toggle => {
            widget.toggle().await;
        }
        ChatCommand::History => {
            if let Err(e) = widget.load_history().await {
                println!(
                    "\n  {} Could not load history: {e}\n",
                    style("!").yellow().bold()
                );
            } else if !widget.is_open() {
                println!("  {}", style("History synced. /open to show it.").dim());
            }
        }
        ChatCommand::Logout => {
            state.signals.publish(SessionSignal::UserLoggedOut);
        }
        ChatCommand::Session => match widget.persisted_session_id().await {
            Some(id) => println!("  {} {}", style("Session:").bold(), style(id).dim()),
            None => println!(
                "  {}",
                style("No session yet. One is created with your next message.").dim()
            ),
        },
        ChatCommand::Unknown(name) => {
            println!(
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(name).dim()
            );
        }
    }
    false
}

async fn handle_signal(widget: &mut ConcreteChatWidget, signal: SessionSignal) {
    info!(?signal, "Session signal received");
    widget.handle_signal(signal).await;
}

/// Send a message, opening the panel first so the reply is visible.
async fn send_with_spinner(widget: &mut ConcreteChatWidget, text: &str) {
    if !widget.is_open() {
        widget.open().await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    widget.send_message(text).await;

    spinner.finish_and_clear();
}

/// Print everything the widget published since the last drain.
fn drain_events(events: &mut broadcast::Receiver<WidgetEvent>, view: &mut PanelView) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(out) = view.apply(&event) {
                    print!("{out}");
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Panel fell behind widget events");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}
