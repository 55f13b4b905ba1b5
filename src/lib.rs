//! Hey - personal terminal assistant library
//!
//! This library provides the core functionality of the `hey` chat client:
//! the interactive browse and chat screens, the completion provider
//! abstraction, conversation persistence, and terminal rendering.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `ui`: The browse screen (conversation picker) and chat screen (live loop)
//! - `providers`: Completion provider abstraction and the OpenAI implementation
//! - `store`: Conversation history persisted as a single JSON document
//! - `render`: Message blocks, width math, and the external markdown process
//! - `term`: Terminal primitives behind a capability trait
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Thin handlers dispatched from the entrypoint

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod providers;
pub mod render;
pub mod store;
pub mod term;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use error::{HeyError, Result};
pub use providers::{ChatMessage, Provider, Role};
pub use store::{ChatStore, Conversation};

#[cfg(test)]
pub mod test_utils;
