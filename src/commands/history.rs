//! History maintenance command handler

use crate::error::Result;
use crate::store::ChatStore;

/// Remove every stored conversation
pub fn clear(store: &ChatStore) -> Result<()> {
    store.clear()?;
    tracing::info!("chat history cleared");
    println!("Chat history cleared.");
    Ok(())
}
