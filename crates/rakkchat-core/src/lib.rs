//! Session lifecycle and history synchronization for the rakkchat widget.
//!
//! This crate defines the "ports" (`SessionStore`, `ChatBackend`) that the
//! infrastructure layer implements, plus the widget logic built on them. It
//! depends only on `rakkchat-types` -- never on `rakkchat-infra` or any
//! HTTP/filesystem crate.

pub mod chat;
pub mod event;
pub mod session;
pub mod storage;
