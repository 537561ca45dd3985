//! The widget's ordered, in-memory list of displayed messages.

use rakkchat_types::chat::ChatMessage;

/// Chronologically ordered messages currently shown in the panel.
///
/// A cache of the service's history: rebuilt wholesale on every sync,
/// appended to while chatting, emptied on logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append one message at the end.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Discard everything and take `messages` as the new contents.
    pub fn replace(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
