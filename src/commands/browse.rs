//! Browse command handler

use crate::commands::chat;
use crate::error::Result;
use crate::providers::Provider;
use crate::render::Renderer;
use crate::store::ChatStore;
use crate::term::Terminal;
use crate::ui::{BrowseOutcome, BrowseScreen, ChatTarget};

/// Open the conversation picker and hand off to the chat screen
pub fn run(
    store: &ChatStore,
    provider: &dyn Provider,
    renderer: &Renderer<'_>,
    term: &mut dyn Terminal,
    page_size: usize,
) -> Result<()> {
    let conversations = store.load_all()?;
    tracing::debug!(count = conversations.len(), "entering browse screen");
    let mut screen = BrowseScreen::new(renderer.layout(), page_size, conversations);
    match screen.run(term)? {
        BrowseOutcome::SelectedExisting(id) => {
            chat::run(store, provider, renderer, term, ChatTarget::Id(id), None)
        }
        BrowseOutcome::SelectedNew => {
            chat::run(store, provider, renderer, term, ChatTarget::New, None)
        }
        BrowseOutcome::Quit => Ok(()),
    }
}
