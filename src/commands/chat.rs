//! Interactive chat command handler

use crate::error::Result;
use crate::providers::Provider;
use crate::render::Renderer;
use crate::store::ChatStore;
use crate::term::Terminal;
use crate::ui::{ChatScreen, ChatTarget};

/// Open the chat screen on the given target conversation
///
/// An `initial_prompt` performs one exchange before the loop starts.
pub fn run(
    store: &ChatStore,
    provider: &dyn Provider,
    renderer: &Renderer<'_>,
    term: &mut dyn Terminal,
    target: ChatTarget,
    initial_prompt: Option<&str>,
) -> Result<()> {
    tracing::debug!(?target, "entering chat screen");
    let mut screen = ChatScreen::new(store, provider, renderer, target)?;
    screen.run(term, initial_prompt)
}
