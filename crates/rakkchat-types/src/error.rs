use thiserror::Error;

/// Errors from talking to the remote chat service.
///
/// All three kinds are handled the same way at the widget boundary: a send
/// falls back to a canned bot message, a history load leaves the transcript
/// untouched, a logout request is logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The request never produced a usable HTTP response (connect, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered but reported a logical failure.
    #[error("service error: {0}")]
    Service(String),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors from the durable key-value store holding the session identifier.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage file is corrupt: {0}")]
    Corrupt(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
