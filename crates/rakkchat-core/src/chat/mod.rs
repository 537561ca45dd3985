//! Chat transcript, history synchronization, and the widget itself.
//!
//! `ChatBackend` is the port to the remote chat service; `ChatWidget` wires
//! it together with the session identity and the transcript.

pub mod backend;
pub mod history;
pub mod transcript;
pub mod widget;

pub use backend::ChatBackend;
pub use transcript::Transcript;
pub use widget::ChatWidget;
