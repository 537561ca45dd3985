//! CLI command definitions for the `rakkchat` binary.
//!
//! Uses clap derive macros for argument parsing. `rakkchat chat` opens the
//! interactive panel; the remaining commands are one-shot operations on the
//! same persisted session.

pub mod chat;
pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Talk to the RakkGears shopping assistant from your terminal.
#[derive(Parser)]
#[command(name = "rakkchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log errors. Command output on stdout is unaffected.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "RAKKCHAT_OTEL")]
    pub otel: bool,

    /// Base URL of the chat service, overriding config.toml.
    #[arg(long, global = true, env = "RAKKCHAT_SERVICE_URL")]
    pub service_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Filter directives for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,rakkchat=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive chat panel.
    Chat,

    /// Send a single message and print the reply.
    Send {
        /// Message text (multiple words are joined with spaces).
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print the conversation history of the current session.
    History,

    /// Clear the server-side history and forget the session identifier.
    Logout,

    /// Print the current session identifier.
    Session,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_send_joins_words() {
        let cli = Cli::try_parse_from(["rakkchat", "send", "show", "me", "jackets"]).unwrap();
        match cli.command {
            Commands::Send { text } => assert_eq!(text.join(" "), "show me jackets"),
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_send_requires_text() {
        assert!(Cli::try_parse_from(["rakkchat", "send"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rakkchat",
            "history",
            "--json",
            "--service-url",
            "https://shop.example.com",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.service_url.as_deref(), Some("https://shop.example.com"));
        assert!(matches!(cli.command, Commands::History));
    }

    #[test]
    fn test_quiet_help_describes_log_level_only() {
        let cmd = Cli::command();
        let quiet = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "quiet")
            .unwrap();
        let help = quiet.get_help().unwrap().to_string();
        assert!(help.starts_with("Only log errors"));
    }

    #[test]
    fn test_verbosity_maps_to_filter() {
        let quiet = Cli::try_parse_from(["rakkchat", "--quiet", "session"]).unwrap();
        assert_eq!(quiet.log_filter(), "error");

        let default = Cli::try_parse_from(["rakkchat", "session"]).unwrap();
        assert_eq!(default.log_filter(), "warn");

        let verbose = Cli::try_parse_from(["rakkchat", "-v", "session"]).unwrap();
        assert_eq!(verbose.log_filter(), "info,rakkchat=debug");

        let trace = Cli::try_parse_from(["rakkchat", "-vv", "session"]).unwrap();
        assert_eq!(trace.log_filter(), "trace");
    }
}
