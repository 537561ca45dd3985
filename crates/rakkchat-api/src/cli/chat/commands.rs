//! Slash command parsing for the chat panel.
//!
//! Commands start with `/` and drive the panel controls and session
//! lifecycle. Any other input is sent to the assistant.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat panel.
    Exit,
    /// Open the panel (re-syncs history).
    Open,
    /// Close the panel.
    Close,
    /// Flip the panel between open and closed.
    Toggle,
    /// Re-sync the transcript from the service.
    History,
    /// Raise the logout notification.
    Logout,
    /// Show the session identifier.
    Session,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/open" => Some(ChatCommand::Open),
        "/close" => Some(ChatCommand::Close),
        "/toggle" | "/t" => Some(ChatCommand::Toggle),
        "/history" => Some(ChatCommand::History),
        "/logout" => Some(ChatCommand::Logout),
        "/session" => Some(ChatCommand::Session),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let entries = [
        ("/help", "Show this help message"),
        ("/open", "Open the panel and reload history"),
        ("/close", "Close the panel"),
        ("/toggle", "Open or close the panel"),
        ("/history", "Reload the conversation history"),
        ("/session", "Show the session id"),
        ("/logout", "Clear history and start a new session"),
        ("/clear", "Clear the screen"),
        ("/exit", "Leave the chat"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (name, description) in entries {
        println!("  {:<10} {}", style(name).cyan(), description);
    }
    println!();
    println!(
        "  {}",
        style("Anything else is sent to the assistant. Ctrl+D to exit.").dim()
    );
    println!();
}
