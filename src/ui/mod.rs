//! Interactive screens for Hey
//!
//! The browse screen (paginated conversation picker) and the chat screen
//! (live prompt/reply loop). Both draw through the [`Terminal`] capability
//! trait and erase exactly the lines they drew, so they can run against a
//! fake terminal in tests.
//!
//! [`Terminal`]: crate::term::Terminal

pub mod browse;
pub mod chat;

pub use browse::{BrowseOutcome, BrowseScreen};
pub use chat::{ChatScreen, ChatTarget};
