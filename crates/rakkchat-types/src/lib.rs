//! Shared domain types for the rakkchat widget.
//!
//! This crate contains the types exchanged between the widget core, the
//! chat service adapter, and the terminal front end: chat messages and
//! product links, the chat service wire payloads, widget events, the
//! widget configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod event;
