//! One-shot command handler: a single exchange printed inline
//!
//! No chat frame is drawn; the reply is rendered at full terminal width
//! and the process is expected to exit afterwards. The exchange is still
//! persisted so a follow-up invocation can continue it.

use crate::error::Result;
use crate::providers::{ChatMessage, Provider};
use crate::render::{now_ms, Renderer};
use crate::store::{ChatStore, Conversation};
use crate::term::Terminal;
use colored::Colorize;

/// Which conversation a one-shot exchange extends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneshotMode {
    /// Always continue the most recent conversation
    Continue,
    /// Always start a fresh conversation
    New,
    /// Continue the most recent conversation only if it is recent enough,
    /// otherwise start fresh
    Auto,
}

/// Perform one exchange and print the reply inline
pub fn run(
    store: &ChatStore,
    provider: &dyn Provider,
    renderer: &Renderer<'_>,
    term: &mut dyn Terminal,
    mode: OneshotMode,
    prompt: &str,
    recent_window_ms: i64,
) -> Result<()> {
    let conversation: Option<Conversation> = match mode {
        OneshotMode::Continue => Some(store.most_recent()?),
        OneshotMode::New => None,
        OneshotMode::Auto => store.recent_conversation(now_ms(), recent_window_ms)?,
    };
    tracing::debug!(
        ?mode,
        continued = conversation.is_some(),
        "one-shot exchange"
    );

    let mut messages: Vec<ChatMessage> = conversation
        .as_ref()
        .map(|c| {
            c.messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role,
                    content: m.content.clone(),
                })
                .collect()
        })
        .unwrap_or_default();
    messages.push(ChatMessage::user(prompt));

    let user_time = now_ms();
    term.hide_cursor();
    let placeholder = ["".to_string(), format!("{}", "   ...".yellow()), String::new()];
    for line in &placeholder {
        term.print(line);
    }

    let reply = provider.complete(&messages);

    term.clear_lines(placeholder.len());
    term.show_cursor();
    let reply = reply?;

    let ai_time = now_ms();
    store.append_exchange(
        conversation.as_ref().map(|c| c.id.as_str()),
        prompt,
        &reply,
        user_time,
        ai_time,
    )?;

    term.print(&renderer.markdown(&reply, true));
    Ok(())
}
