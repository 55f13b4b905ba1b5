//! Base provider trait and message types for Hey
//!
//! This module defines the Provider trait the chat loop talks to, along
//! with the role-tagged message type sent over the wire and stored in the
//! history document.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a chat message sender
///
/// A closed two-variant tag: conversations only ever contain user prompts
/// and assistant replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A prompt typed by the user
    User,
    /// A reply produced by the model
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Message structure for a completion request
///
/// The ordered sequence of these is the full context sent to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use hey::providers::{ChatMessage, Role};
    ///
    /// let msg = ChatMessage::user("Hello, assistant!");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use hey::providers::{ChatMessage, Role};
    ///
    /// let msg = ChatMessage::assistant("Hello, user!");
    /// assert_eq!(msg.role, Role::Assistant);
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Completion capability
///
/// One blocking call: the full role-tagged conversation in, the reply text
/// out. Failures are fatal for the invocation; there is no retry policy.
pub trait Provider {
    /// Request a completion for the given ordered message sequence
    fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
