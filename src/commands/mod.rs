//! Command handlers for the CLI
//!
//! Thin handlers invoked by the entrypoint once configuration, storage,
//! and the provider are constructed:
//!
//! - `browse`  — the conversation picker, handing off to chat
//! - `chat`    — the interactive chat screen
//! - `oneshot` — a single non-interactive exchange printed inline
//! - `history` — history maintenance

pub mod browse;
pub mod chat;
pub mod history;
pub mod oneshot;
