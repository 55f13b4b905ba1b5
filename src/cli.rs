//! Command-line interface definition for Hey
//!
//! This module defines the CLI structure using clap's derive API. The
//! surface is deliberately small: a handful of mode flags plus a free-form
//! prompt made of every positional argument joined with spaces.

use clap::Parser;
use std::path::PathBuf;

/// Hey - your personal terminal assistant
///
/// Passing no prompt opens the interactive browser; passing a prompt
/// replies inline. If the previous chat was less than five minutes ago,
/// an inline prompt continues it by default.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "hey")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Jump straight into a new conversation
    #[arg(short = 'n', long)]
    pub new: bool,

    /// Continue the previous chat
    #[arg(short = 'c', long = "continue")]
    pub continue_chat: bool,

    /// Reply to the prompt in an interactive chat instead of inline
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Browse previous chats to continue from
    #[arg(short = 'b', long)]
    pub browse: bool,

    /// Remove all previous chats
    #[arg(long)]
    pub clear_history: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Prompt text; all words are joined into one prompt
    #[arg(trailing_var_arg = true)]
    pub prompt: Vec<String>,
}

impl Cli {
    /// Join the positional arguments into the prompt text
    pub fn prompt_text(&self) -> String {
        self.prompt.join(" ").trim().to_string()
    }

    /// Whether a non-empty prompt was supplied
    pub fn has_prompt(&self) -> bool {
        !self.prompt_text().is_empty()
    }
}
