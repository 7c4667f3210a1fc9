//! Message domain types.
//!
//! These are the value objects that flow through the entire system:
//! the assembler produces an ordered message sequence, the providers
//! translate it into a backend-specific payload.

use serde::{Deserialize, Serialize};

/// The role of a message in an assembled conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions (always first, exactly once)
    System,
    /// Authored prompt or injected background context
    User,
    /// A previously generated (or prefilled) response
    Assistant,
}

/// A single role-tagged message. Ordering is semantically significant:
/// turn order is chat order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who speaks this turn
    pub role: Role,

    /// The text content
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Write the introduction");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Write the introduction");
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::system("Be terse");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, msg);
    }
}
