//! Shared helpers for integration tests

#![allow(dead_code)]

use hey::error::Result;
use hey::providers::{ChatMessage, Provider};
use hey::render::Markdown;
use hey::store::ChatStore;
use hey::term::{Key, Terminal};
use hey::HeyError;
use std::cell::RefCell;
use std::collections::VecDeque;
use tempfile::TempDir;

/// Create a chat store backed by a temporary directory
pub fn temp_store() -> (ChatStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    let store = ChatStore::open_at(dir.path().join("prev_chats.json"))
        .expect("Failed to open chat store");
    (store, dir)
}

/// Terminal that replays scripted keys and input lines, recording output
pub struct ScriptedTerminal {
    keys: VecDeque<Key>,
    input: VecDeque<String>,
    pub lines: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys: keys.into(),
            input: VecDeque::new(),
            lines: Vec::new(),
        }
    }

    pub fn with_input(mut self, lines: Vec<&str>) -> Self {
        self.input = lines.into_iter().map(String::from).collect();
        self
    }

    pub fn screen(&self) -> String {
        self.lines
            .iter()
            .map(|l| hey::term::strip_ansi(l))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Terminal for ScriptedTerminal {
    fn read_key(&mut self) -> Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| HeyError::Terminal("scripted keys exhausted".to_string()).into())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.input.pop_front() {
            Some(line) => {
                self.lines.push(format!("{}{}", prompt, line));
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }

    fn print(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn clear_lines(&mut self, n: usize) {
        let keep = self.lines.len().saturating_sub(n);
        self.lines.truncate(keep);
    }

    fn hide_cursor(&mut self) {}

    fn show_cursor(&mut self) {}
}

/// Provider returning predetermined replies in order
pub struct MockProvider {
    replies: RefCell<VecDeque<String>>,
    pub requests: RefCell<Vec<Vec<ChatMessage>>>,
}

impl MockProvider {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().map(String::from).collect()),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl Provider for MockProvider {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.requests.borrow_mut().push(messages.to_vec());
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| HeyError::Provider("no more canned replies".to_string()).into())
    }
}

/// Markdown pass-through, so rendered output equals the raw message
pub struct PlainMarkdown;

impl Markdown for PlainMarkdown {
    fn render(&self, text: &str, _width: usize) -> Result<String> {
        Ok(text.trim().to_string())
    }
}
