//! Test utilities for Hey
//!
//! Fake implementations of the capability traits so the interactive
//! screens, renderer, and chat loop can be exercised without a tty, an
//! external markdown process, or a network connection.

use crate::error::{HeyError, Result};
use crate::providers::{ChatMessage, Provider};
use crate::render::Markdown;
use crate::term::{strip_ansi, Key, Terminal};
use std::cell::RefCell;
use std::collections::VecDeque;

/// In-memory terminal that replays scripted input and records output
///
/// `read_key` pops from the scripted key queue; `read_line` pops from the
/// scripted line queue, returning `None` (end-of-input) once exhausted.
/// `print` appends to `lines` and `clear_lines` removes from its tail, so
/// after a run `lines` holds exactly what would remain on screen.
pub struct FakeTerminal {
    keys: VecDeque<Key>,
    input: VecDeque<String>,
    /// Lines currently "on screen"
    pub lines: Vec<String>,
    hidden_depth: usize,
    was_hidden: bool,
}

impl FakeTerminal {
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys: keys.into(),
            input: VecDeque::new(),
            lines: Vec::new(),
            hidden_depth: 0,
            was_hidden: false,
        }
    }

    /// Script the lines returned by `read_line`
    pub fn with_input(mut self, lines: Vec<&str>) -> Self {
        self.input = lines.into_iter().map(String::from).collect();
        self
    }

    /// Remaining screen content with ANSI styling stripped
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| strip_ansi(l)).collect()
    }

    /// Whole remaining screen as one plain-text string
    pub fn screen(&self) -> String {
        self.plain_lines().join("\n")
    }

    /// How many more hides than shows have been issued
    pub fn cursor_hidden_depth(&self) -> usize {
        self.hidden_depth
    }

    /// Whether the cursor was ever hidden
    pub fn cursor_was_hidden(&self) -> bool {
        self.was_hidden
    }
}

impl Terminal for FakeTerminal {
    fn read_key(&mut self) -> Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| HeyError::Terminal("scripted keys exhausted".to_string()).into())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.input.pop_front() {
            Some(line) => {
                // model the echoed input row the real editor leaves behind
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

    fn hide_cursor(&mut self) {
        self.hidden_depth += 1;
        self.was_hidden = true;
    }

    fn show_cursor(&mut self) {
        self.hidden_depth = self.hidden_depth.saturating_sub(1);
    }
}

/// Provider returning canned replies and recording every request
pub struct FakeProvider {
    replies: RefCell<VecDeque<String>>,
    /// Message lists passed to `complete`, in call order
    pub requests: RefCell<Vec<Vec<ChatMessage>>>,
    fail: bool,
}

impl FakeProvider {
    pub fn with_replies(replies: Vec<&str>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().map(String::from).collect()),
            requests: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    /// A provider whose every completion fails
    pub fn failing() -> Self {
        Self {
            replies: RefCell::new(VecDeque::new()),
            requests: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    /// Number of completions requested so far
    pub fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Provider for FakeProvider {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.requests.borrow_mut().push(messages.to_vec());
        if self.fail {
            return Err(HeyError::Provider("completion request failed".to_string()).into());
        }
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| HeyError::Provider("canned replies exhausted".to_string()).into())
    }
}

/// Markdown fake that echoes its input, or always fails
pub struct FakeMarkdown {
    fail: bool,
}

impl FakeMarkdown {
    pub fn identity() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl Markdown for FakeMarkdown {
    fn render(&self, text: &str, _width: usize) -> Result<String> {
        if self.fail {
            return Err(HeyError::Render("renderer unavailable".to_string()).into());
        }
        Ok(text.trim().to_string())
    }
}

/// Markdown fake that records the width requested of it
pub struct RecordingMarkdown {
    width: RefCell<Option<usize>>,
}

impl RecordingMarkdown {
    pub fn new() -> Self {
        Self {
            width: RefCell::new(None),
        }
    }

    pub fn last_width(&self) -> Option<usize> {
        *self.width.borrow()
    }
}

impl Markdown for RecordingMarkdown {
    fn render(&self, text: &str, width: usize) -> Result<String> {
        *self.width.borrow_mut() = Some(width);
        Ok(text.trim().to_string())
    }
}
