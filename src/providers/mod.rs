//! Completion provider abstraction for Hey
//!
//! The chat loop depends only on the [`Provider`] trait; the single real
//! implementation speaks the OpenAI chat-completions wire format over a
//! blocking HTTP client.

mod base;
mod openai;

pub use base::{ChatMessage, Provider, Role};
pub use openai::OpenAiProvider;
