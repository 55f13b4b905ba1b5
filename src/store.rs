//! Persisted chat history for Hey
//!
//! The whole history lives in one JSON document: a list of conversation
//! records, each an id plus an ordered message sequence. Every operation
//! is read-modify-write on the file; there is no locking, so concurrent
//! writers are last-writer-wins (a documented limitation, not a guarantee).

use crate::config::Config;
use crate::error::{HeyError, Result};
use crate::providers::Role;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the history file location
///
/// Useful for pointing the binary at a test file or alternate history
/// without touching the user's data directory.
pub const HISTORY_PATH_ENV: &str = "HEY_HISTORY_PATH";

/// A single stored message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Role of the sender
    pub role: Role,
    /// Message text; arbitrary UTF-8, may contain newlines
    pub content: String,
    /// Creation time in milliseconds since the epoch
    pub time: i64,
}

/// A persisted conversation: an opaque id plus its message sequence
///
/// Messages are appended in chronological order and never reordered or
/// edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Opaque unique id, generated at creation
    pub id: String,
    /// Ordered message sequence; alternates user/assistant pairs
    pub messages: Vec<StoredMessage>,
}

impl Conversation {
    /// Timestamp of the most recent message, or 0 for an empty record
    pub fn last_time(&self) -> i64 {
        self.messages.last().map(|m| m.time).unwrap_or(0)
    }

    /// Timestamp of the first message, or 0 for an empty record
    pub fn created_time(&self) -> i64 {
        self.messages.first().map(|m| m.time).unwrap_or(0)
    }

    /// Content of the first message, used as the browse-row preview
    pub fn preview(&self) -> &str {
        self.messages.first().map(|m| m.content.as_str()).unwrap_or("")
    }
}

/// Storage backend for conversation history
///
/// Owns all conversations; the UI components borrow records and request
/// mutations through it.
pub struct ChatStore {
    path: PathBuf,
}

impl ChatStore {
    /// Open the store at its configured location
    ///
    /// Resolution order: `HEY_HISTORY_PATH` environment variable, then the
    /// configured `storage.history_path`, then the platform data
    /// directory. The file is initialised to an empty list when missing.
    pub fn open(config: &Config) -> Result<Self> {
        if let Ok(override_path) = std::env::var(HISTORY_PATH_ENV) {
            return Self::open_at(override_path);
        }
        if let Some(path) = &config.storage.history_path {
            return Self::open_at(path.clone());
        }

        let dirs = directories::ProjectDirs::from("nz", "hey", "hey").ok_or_else(|| {
            HeyError::Config("could not determine data directory".to_string())
        })?;
        Self::open_at(dirs.data_dir().join("prev_chats.json"))
    }

    /// Open the store at an explicit path
    ///
    /// Primarily useful for tests where the default application data
    /// directory is not desirable.
    ///
    /// # Examples
    ///
    /// ```
    /// use hey::store::ChatStore;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = ChatStore::open_at(dir.path().join("chats.json")).unwrap();
    /// assert!(store.load_all().unwrap().is_empty());
    /// ```
    pub fn open_at<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self { path };
        if !store.path.exists() {
            store.write_all(&[])?;
        }
        Ok(store)
    }

    /// Load every conversation, sorted most recently updated first
    pub fn load_all(&self) -> Result<Vec<Conversation>> {
        let mut chats = self.read_raw()?;
        chats.sort_by_key(|chat| std::cmp::Reverse(chat.last_time()));
        Ok(chats)
    }

    /// Look up a conversation by its id
    pub fn get(&self, id: &str) -> Result<Conversation> {
        self.read_raw()?
            .into_iter()
            .find(|chat| chat.id == id)
            .ok_or_else(|| HeyError::NotFound(format!("conversation {}", id)).into())
    }

    /// The most recently updated conversation
    ///
    /// An empty store is an explicit `NotFound` error, never an index out
    /// of range.
    pub fn most_recent(&self) -> Result<Conversation> {
        self.load_all()?
            .into_iter()
            .next()
            .ok_or_else(|| HeyError::NotFound("no previous chats".to_string()).into())
    }

    /// The most recent conversation when it falls inside the recency window
    ///
    /// Returns `None` when the store is empty or the latest message is
    /// older than `window_ms` relative to `now_ms`.
    pub fn recent_conversation(&self, now_ms: i64, window_ms: i64) -> Result<Option<Conversation>> {
        let chats = self.load_all()?;
        Ok(chats
            .into_iter()
            .next()
            .filter(|chat| chat.last_time() > now_ms - window_ms))
    }

    /// Append one exchange: a user prompt followed by the assistant reply
    ///
    /// With `id = None` a new conversation record with a fresh uuid is
    /// created; otherwise the two messages are appended to the existing
    /// record. Returns the id of the conversation written to.
    pub fn append_exchange(
        &self,
        id: Option<&str>,
        prompt: &str,
        reply: &str,
        user_time: i64,
        ai_time: i64,
    ) -> Result<String> {
        let mut chats = self.read_raw()?;

        let user_msg = StoredMessage {
            role: Role::User,
            content: prompt.to_string(),
            time: user_time,
        };
        let ai_msg = StoredMessage {
            role: Role::Assistant,
            content: reply.to_string(),
            time: ai_time,
        };

        let written_id = match id {
            Some(existing) => {
                let chat = chats
                    .iter_mut()
                    .find(|chat| chat.id == existing)
                    .ok_or_else(|| HeyError::NotFound(format!("conversation {}", existing)))?;
                chat.messages.push(user_msg);
                chat.messages.push(ai_msg);
                existing.to_string()
            }
            None => {
                let fresh = uuid::Uuid::new_v4().to_string();
                chats.push(Conversation {
                    id: fresh.clone(),
                    messages: vec![user_msg, ai_msg],
                });
                fresh
            }
        };

        self.write_all(&chats)?;
        tracing::debug!(id = %written_id, "saved exchange");
        Ok(written_id)
    }

    /// Overwrite the history with an empty list
    pub fn clear(&self) -> Result<()> {
        self.write_all(&[])
    }

    /// Read and parse the document without sorting
    fn read_raw(&self) -> Result<Vec<Conversation>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let chats: Vec<Conversation> = serde_json::from_str(&contents).map_err(|e| {
            HeyError::StoreCorrupt(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(chats)
    }

    /// Serialize and write the whole document
    fn write_all(&self, chats: &[Conversation]) -> Result<()> {
        let contents = serde_json::to_string(chats)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
