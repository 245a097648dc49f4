//! Conversation messages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One turn of an OpenAI-style conversation.
///
/// Keys other than `role` and `content` (e.g. `name`) are kept in `extra`
/// and written back unchanged, so a caller's conversation survives the
/// round trip through the chat service and the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,

    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Create a message with an arbitrary role.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// Create a `system` message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a `user` message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// The message the model produced, with the role it reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub role: String,
    pub content: String,
}

impl From<AssistantReply> for Message {
    fn from(reply: AssistantReply) -> Self {
        Self::new(reply.role, reply.content)
    }
}
