//! Interactive terminal chat panel.
//!
//! Implements the presentation side of the widget: a readline prompt,
//! slash commands for the panel controls, a spinner while a reply is
//! pending, and markdown rendering of the transcript. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
