use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    You,
    Fynoraq,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::You => write!(f, "You"),
            Sender::Fynoraq => write!(f, "Fynoraq"),
        }
    }
}

/// One chat message. Immutable once created; the timestamp is captured at
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        ChatMessage {
            sender,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn from_user(&self) -> bool {
        self.sender == Sender::You
    }
}

/// The session's message list. Append-only in insertion order; the only
/// other mutation is a wholesale clear.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript {
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&ChatMessage> {
        self.messages.get(idx)
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.messages
    }
}
