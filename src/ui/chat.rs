//! Chat screen: the live prompt/reply loop
//!
//! Resolves its target conversation on entry, replays stored messages,
//! then loops reading a prompt line, calling the completion provider, and
//! appending the exchange to the store. Exit keywords end the loop with a
//! farewell; completion failures abort it with nothing persisted.

use crate::error::Result;
use crate::providers::{ChatMessage, Provider};
use crate::render::{now_ms, Renderer};
use crate::store::{ChatStore, Conversation};
use crate::term::Terminal;
use colored::Colorize;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Inputs that end the interactive loop; exact, case-sensitive matches
const EXIT_WORDS: &[&str] = &["quit", "q", "exit"];

const GOODBYE_PHRASES: &[&str] = &[
    "See you later",
    "Catch you later",
    "Smell you later",
    "See ya loser",
    "Bye for now",
    "Peace out",
    "Talk to you later",
    "So long",
    "Adios",
    "Ciao",
    "See you around",
    "Until our paths cross again",
    "Godspeed",
    "Don't do anything I would do",
];

/// Which conversation the chat screen should open
#[derive(Debug, Clone)]
pub enum ChatTarget {
    /// A fresh conversation, persisted on its first exchange
    New,
    /// The most recently updated stored conversation
    MostRecent,
    /// A specific stored conversation
    Id(String),
}

/// The interactive chat loop
pub struct ChatScreen<'a> {
    store: &'a ChatStore,
    provider: &'a dyn Provider,
    renderer: &'a Renderer<'a>,
    conversation: Option<Conversation>,
}

impl<'a> ChatScreen<'a> {
    /// Resolve the target conversation and build the screen
    ///
    /// `MostRecent` against an empty store and an unknown `Id` both fail
    /// here, before anything is drawn.
    pub fn new(
        store: &'a ChatStore,
        provider: &'a dyn Provider,
        renderer: &'a Renderer<'a>,
        target: ChatTarget,
    ) -> Result<Self> {
        let conversation = match target {
            ChatTarget::New => None,
            ChatTarget::MostRecent => Some(store.most_recent()?),
            ChatTarget::Id(id) => Some(store.get(&id)?),
        };
        Ok(Self {
            store,
            provider,
            renderer,
            conversation,
        })
    }

    /// Run the loop until an exit keyword, end-of-input, or a fatal error
    pub fn run(&mut self, term: &mut dyn Terminal, initial_prompt: Option<&str>) -> Result<()> {
        let title = self
            .renderer
            .chat_title(self.conversation.as_ref().map(|c| c.last_time()));
        term.print(&title);

        if let Some(conversation) = self.conversation.clone() {
            for message in &conversation.messages {
                let block = match message.role {
                    crate::providers::Role::User => {
                        self.renderer.user_block(&message.content, message.time)
                    }
                    crate::providers::Role::Assistant => {
                        self.renderer.assistant_block(&message.content, message.time)
                    }
                };
                print_block(term, &block);
            }
        }

        if let Some(prompt) = initial_prompt {
            if !prompt.trim().is_empty() {
                self.exchange(term, prompt)?;
            }
        }

        loop {
            let rule = format!("{}", "─".repeat(self.renderer.layout().cols).blue());
            term.print("");
            term.print(&rule);
            let input = term.read_line(&format!("{}", "> ".blue().bold()))?;

            let Some(prompt) = input else {
                // end-of-input behaves like an exit keyword
                term.clear_lines(2);
                self.goodbye(term);
                break;
            };
            term.clear_lines(3);

            if prompt.trim().is_empty() {
                continue;
            }
            if EXIT_WORDS.contains(&prompt.as_str()) {
                self.goodbye(term);
                break;
            }

            self.exchange(term, &prompt)?;
        }
        Ok(())
    }

    /// Perform one prompt/reply exchange and persist it
    ///
    /// The thinking placeholder is erased and the cursor restored before
    /// a provider error propagates; a failed exchange persists nothing.
    pub fn exchange(&mut self, term: &mut dyn Terminal, prompt: &str) -> Result<()> {
        let user_time = now_ms();
        print_block(term, &self.renderer.user_block(prompt, user_time));

        let mut messages: Vec<ChatMessage> = self
            .conversation
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

        term.hide_cursor();
        let placeholder = self
            .renderer
            .assistant_frame(&format!("\n{}\n", "   ...".yellow()), now_ms());
        print_block(term, &placeholder);

        let reply = self.provider.complete(&messages);

        term.clear_lines(placeholder.len());
        term.show_cursor();
        let reply = reply?;

        let ai_time = now_ms();
        let prev_id = self.conversation.as_ref().map(|c| c.id.clone());
        let id = self
            .store
            .append_exchange(prev_id.as_deref(), prompt, &reply, user_time, ai_time)?;
        self.conversation = Some(self.store.get(&id)?);

        print_block(term, &self.renderer.assistant_block(&reply, ai_time));
        Ok(())
    }

    fn goodbye(&self, term: &mut dyn Terminal) {
        let mut rng = rand::rng();
        let body = if rng.random_range(0..21) == 0 {
            "👉😎👉".to_string()
        } else {
            let phrase = GOODBYE_PHRASES
                .choose(&mut rng)
                .copied()
                .unwrap_or("Bye for now");
            format!("{} 👋", phrase)
        };
        print_block(term, &self.renderer.assistant_frame(&body, now_ms()));
        term.print("");
    }
}

fn print_block(term: &mut dyn Terminal, lines: &[String]) {
    for line in lines {
        term.print(line);
    }
}
