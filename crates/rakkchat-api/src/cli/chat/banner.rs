//! Welcome banner display for the chat panel.

use console::style;

/// Print the banner shown when the panel starts.
pub fn print_welcome_banner(title: &str, service_url: &str, session_id: &str) {
    println!();
    println!("  {} {}", style("*").cyan().bold(), style(title).cyan().bold());
    println!();
    println!("  {}  {}", style("Service:").bold(), style(service_url).dim());
    println!("  {}  {}", style("Session:").bold(), style(session_id).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
