//! Session identity for the chat widget.
//!
//! The widget correlates a user's conversation across requests with a single
//! opaque identifier persisted in the browser-profile equivalent store.

pub mod identity;

pub use identity::{generate_session_id, SessionIdentity};
