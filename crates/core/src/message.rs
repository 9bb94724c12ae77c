//! Conversation messages.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::Response;

const CONTENT_PREVIEW_LEN: usize = 40;

/// The author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The system instructions.
    System,
    /// The human side of the conversation.
    User,
    /// The model side of the conversation.
    Assistant,
}

impl Role {
    /// Returns the role name as it appears on the wire.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The minimal form of a message that is sent to the remote.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireMessage {
    /// The author.
    pub role: Role,
    /// The text.
    pub content: String,
}

/// A single turn in a conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
    response: Option<Response>,
}

impl Message {
    /// Creates a system message.
    #[inline]
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message that isn't backed by a response.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates an assistant message from the primary text of `response`,
    /// keeping the response attached.
    #[inline]
    pub fn from_response(response: Response) -> Self {
        Self {
            role: Role::Assistant,
            content: response.text().to_owned(),
            response: Some(response),
        }
    }

    #[inline]
    fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
            response: None,
        }
    }

    /// Returns the author.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the response that produced this message, if any.
    #[inline]
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Converts the message to its wire form. The attached response is
    /// local bookkeeping and never sent.
    #[inline]
    pub fn to_wire(&self) -> WireMessage {
        WireMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

impl From<WireMessage> for Message {
    #[inline]
    fn from(wire: WireMessage) -> Self {
        Self::new(wire.role, wire.content)
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message({}, {:?})",
            self.role,
            preview(&self.content, CONTENT_PREVIEW_LEN)
        )
    }
}

/// Truncates `text` to `max_chars` characters, marking the cut with `...`.
pub(crate) fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_owned(),
    }
}
