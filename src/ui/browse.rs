//! Browse screen: paginated picker over saved conversations
//!
//! A small state machine over a zero-based linear position in the
//! most-recent-first conversation list. Key events become position moves
//! or terminal outcomes; every move erases the previously drawn block and
//! redraws with the new position highlighted.

use crate::error::Result;
use crate::render::{format_datetime, Layout};
use crate::store::Conversation;
use crate::term::{center, with_hidden_cursor, Key, Terminal};
use colored::Colorize;

/// Active-row cursor glyph
const CURSOR: &str = "◉";
/// Inactive-row cursor glyph
const CURSOR_EMPTY: &str = "◦";

/// Columns consumed by everything in a row that is not the preview text
const PREVIEW_MARGIN: usize = 35;

/// Terminal outcome of the browse screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseOutcome {
    /// The user picked a stored conversation
    SelectedExisting(String),
    /// The user asked for a fresh conversation
    SelectedNew,
    /// The user left without picking anything
    Quit,
}

/// Effect of one key event on the selection state
#[derive(Debug, Clone, PartialEq, Eq)]
enum Transition {
    Move(usize),
    Select,
    NewChat,
    Quit,
    Ignore,
}

/// Map a key to its transition at the given position
///
/// Position arithmetic always wraps modulo the conversation count, so the
/// position stays in range after any key sequence. With zero conversations
/// only `n` and quit remain live.
fn transition(key: Key, position: usize, total: usize, page_size: usize) -> Transition {
    match key {
        Key::Char('n') => return Transition::NewChat,
        Key::Char('q') | Key::Escape => return Transition::Quit,
        _ => {}
    }
    if total == 0 {
        return Transition::Ignore;
    }
    match key {
        Key::Up => Transition::Move((position + total - 1) % total),
        Key::Down => Transition::Move((position + 1) % total),
        Key::Tab | Key::Right => {
            let next = (position / page_size + 1) * page_size;
            Transition::Move(if next >= total { 0 } else { next })
        }
        Key::Left => {
            let page = position / page_size;
            let last_page_start = (total - 1) / page_size * page_size;
            Transition::Move(if page == 0 {
                last_page_start
            } else {
                (page - 1) * page_size
            })
        }
        Key::Enter => Transition::Select,
        _ => Transition::Ignore,
    }
}

/// The paginated conversation picker
pub struct BrowseScreen {
    layout: Layout,
    page_size: usize,
    conversations: Vec<Conversation>,
    last_drawn: usize,
}

impl BrowseScreen {
    /// Build a picker over conversations already sorted most-recent-first
    pub fn new(layout: Layout, page_size: usize, conversations: Vec<Conversation>) -> Self {
        Self {
            layout,
            page_size: page_size.max(1),
            conversations,
            last_drawn: 0,
        }
    }

    /// Run the screen until the user selects, starts a new chat, or quits
    pub fn run(&mut self, term: &mut dyn Terminal) -> Result<BrowseOutcome> {
        let total = self.conversations.len();
        with_hidden_cursor(term, |term| {
            let mut position = 0usize;
            self.draw(term, position);
            loop {
                let key = term.read_key()?;
                match transition(key, position, total, self.page_size) {
                    Transition::Move(next) => {
                        self.erase(term);
                        position = next;
                        self.draw(term, position);
                    }
                    Transition::Select => {
                        self.erase(term);
                        let id = self.conversations[position].id.clone();
                        break Ok(BrowseOutcome::SelectedExisting(id));
                    }
                    Transition::NewChat => {
                        self.erase(term);
                        break Ok(BrowseOutcome::SelectedNew);
                    }
                    Transition::Quit => {
                        self.erase(term);
                        break Ok(BrowseOutcome::Quit);
                    }
                    Transition::Ignore => {}
                }
            }
        })
    }

    fn erase(&mut self, term: &mut dyn Terminal) {
        term.clear_lines(self.last_drawn);
        self.last_drawn = 0;
    }

    fn draw(&mut self, term: &mut dyn Terminal, position: usize) {
        let lines = self.render(position);
        for line in &lines {
            term.print(line);
        }
        self.last_drawn = lines.len();
    }

    /// Produce the full screen block for the given position
    ///
    /// The erase count is taken from this block's length, never from a
    /// hand-counted constant.
    fn render(&self, position: usize) -> Vec<String> {
        let cols = self.layout.cols;
        let total = self.conversations.len();

        let mut lines = vec![
            format!("{}", " hey ".bold().on_purple()),
            format!("{}", "Your personal terminal assistant".bright_black()),
            String::new(),
        ];

        if total == 0 {
            lines.push(center(
                &"No previous chats found.".bright_black().to_string(),
                cols,
            ));
        } else {
            let page = position / self.page_size;
            let offset = position % self.page_size;
            let pages = (total + self.page_size - 1) / self.page_size;

            let start = page * self.page_size;
            let end = (start + self.page_size).min(total);
            for (index, chat) in self.conversations[start..end].iter().enumerate() {
                lines.push(self.render_row(chat, index == offset));
            }

            // short final page keeps the block height stable
            if pages > 1 {
                for _ in end..start + self.page_size {
                    lines.push(String::new());
                }
                lines.push(String::new());
                lines.push(center(&page_bar(page, pages), cols));
            }
        }

        let padding = " ".repeat((cols.saturating_sub(18) + 1) / 3);
        lines.push(String::new());
        lines.push(format!(
            "{}",
            format!("{}(n)ew chat{}(q)uit", padding, padding).purple()
        ));
        lines.push(String::new());
        lines
    }

    fn render_row(&self, chat: &Conversation, active: bool) -> String {
        let max_preview = self.layout.cols.saturating_sub(PREVIEW_MARGIN);
        let date = format!("{}  ", format_datetime(chat.created_time()));

        let flat: String = chat.preview().replace('\n', " ");
        let preview: String = flat.chars().take(max_preview).collect();
        let truncated = preview.chars().count() < flat.chars().count();
        let trail = format!(
            "{}{}",
            if truncated { "..." } else { "   " },
            " ".repeat(max_preview.saturating_sub(preview.chars().count()))
        );
        let count = if chat.messages.len() > 2 {
            format!(" ({})", chat.messages.len())
        } else {
            String::new()
        };

        if active {
            format!(
                "{}{}{}{}{}",
                format!("{} ", CURSOR).green(),
                date.bright_black().bold(),
                preview.bold(),
                trail.bold(),
                count.bright_black().bold()
            )
        } else {
            format!(
                "{}{}{}{}{}",
                format!("{} ", CURSOR_EMPTY).bright_black(),
                date.bright_black(),
                preview,
                trail,
                count.bright_black()
            )
        }
    }
}

/// Page indicator like `[ 0 1 2 ]` with the current page emphasised
fn page_bar(current: usize, pages: usize) -> String {
    let marks: Vec<String> = (0..pages)
        .map(|page| {
            if page == current {
                format!("{}", page.to_string().white().bold())
            } else {
                format!("{}", page.to_string().bright_black())
            }
        })
        .collect();
    format!("[ {} ]", marks.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoredMessage;
    use crate::test_utils::FakeTerminal;

    fn conversations(n: usize) -> Vec<Conversation> {
        (0..n)
            .map(|i| Conversation {
                id: format!("id-{}", i),
                messages: vec![
                    StoredMessage {
                        role: crate::providers::Role::User,
                        content: format!("prompt {}", i),
                        time: 1_000 + i as i64,
                    },
                    StoredMessage {
                        role: crate::providers::Role::Assistant,
                        content: format!("reply {}", i),
                        time: 2_000 + i as i64,
                    },
                ],
            })
            .collect()
    }

    #[test]
    fn test_up_wraps_to_last() {
        assert_eq!(transition(Key::Up, 0, 23, 10), Transition::Move(22));
        assert_eq!(transition(Key::Up, 5, 23, 10), Transition::Move(4));
    }

    #[test]
    fn test_down_wraps_to_first() {
        assert_eq!(transition(Key::Down, 22, 23, 10), Transition::Move(0));
        assert_eq!(transition(Key::Down, 4, 23, 10), Transition::Move(5));
    }

    #[test]
    fn test_up_then_down_is_identity() {
        for position in 0..23 {
            let up = match transition(Key::Up, position, 23, 10) {
                Transition::Move(p) => p,
                other => panic!("unexpected transition {:?}", other),
            };
            assert_eq!(transition(Key::Down, up, 23, 10), Transition::Move(position));
        }
    }

    #[test]
    fn test_position_stays_in_range_over_key_sequences() {
        let total = 23;
        let mut position = 0usize;
        let keys = [
            Key::Down,
            Key::Up,
            Key::Tab,
            Key::Left,
            Key::Right,
            Key::Up,
            Key::Tab,
            Key::Tab,
            Key::Tab,
            Key::Down,
            Key::Left,
            Key::Left,
        ];
        for key in keys {
            if let Transition::Move(next) = transition(key, position, total, 10) {
                position = next;
            }
            assert!(position < total);
        }
    }

    #[test]
    fn test_tab_steps_through_page_starts_and_wraps() {
        assert_eq!(transition(Key::Tab, 0, 23, 10), Transition::Move(10));
        assert_eq!(transition(Key::Tab, 10, 23, 10), Transition::Move(20));
        assert_eq!(transition(Key::Tab, 20, 23, 10), Transition::Move(0));
        // from the last item of the last page
        assert_eq!(transition(Key::Tab, 22, 23, 10), Transition::Move(0));
    }

    #[test]
    fn test_left_jumps_to_previous_page_start() {
        assert_eq!(transition(Key::Left, 15, 23, 10), Transition::Move(0));
        assert_eq!(transition(Key::Left, 22, 23, 10), Transition::Move(10));
        // from page 0 wraps to the last page's start
        assert_eq!(transition(Key::Left, 3, 23, 10), Transition::Move(20));
    }

    #[test]
    fn test_terminal_transitions() {
        assert_eq!(transition(Key::Enter, 2, 5, 10), Transition::Select);
        assert_eq!(transition(Key::Char('n'), 0, 5, 10), Transition::NewChat);
        assert_eq!(transition(Key::Char('q'), 0, 5, 10), Transition::Quit);
        assert_eq!(transition(Key::Escape, 0, 5, 10), Transition::Quit);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        assert_eq!(transition(Key::Char('x'), 2, 5, 10), Transition::Ignore);
    }

    #[test]
    fn test_empty_list_only_new_and_quit_are_live() {
        assert_eq!(transition(Key::Up, 0, 0, 10), Transition::Ignore);
        assert_eq!(transition(Key::Down, 0, 0, 10), Transition::Ignore);
        assert_eq!(transition(Key::Tab, 0, 0, 10), Transition::Ignore);
        assert_eq!(transition(Key::Enter, 0, 0, 10), Transition::Ignore);
        assert_eq!(transition(Key::Char('n'), 0, 0, 10), Transition::NewChat);
        assert_eq!(transition(Key::Char('q'), 0, 0, 10), Transition::Quit);
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let screen = BrowseScreen::new(Layout::new(80), 10, vec![]);
        let block = screen.render(0);
        let joined: String = block
            .iter()
            .map(|l| crate::term::strip_ansi(l))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(joined.contains("No previous chats found."));
        assert!(joined.contains("(n)ew chat"));
        assert!(joined.contains("(q)uit"));
    }

    #[test]
    fn test_single_page_has_no_page_bar() {
        let screen = BrowseScreen::new(Layout::new(80), 10, conversations(4));
        let joined = screen
            .render(0)
            .iter()
            .map(|l| crate::term::strip_ansi(l))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(!joined.contains('['));
    }

    #[test]
    fn test_multi_page_shows_bar_and_fills_short_final_page() {
        let screen = BrowseScreen::new(Layout::new(80), 10, conversations(23));
        let page0 = screen.render(0);
        let page2 = screen.render(20);
        // equal block heights keep the erase count stable across pages
        assert_eq!(page0.len(), page2.len());
        let joined = page2
            .iter()
            .map(|l| crate::term::strip_ansi(l))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(joined.contains("[ 0 1 2 ]"));
    }

    #[test]
    fn test_active_row_uses_filled_cursor() {
        let screen = BrowseScreen::new(Layout::new(80), 10, conversations(3));
        let block = screen.render(1);
        let rows: Vec<String> = block.iter().map(|l| crate::term::strip_ansi(l)).collect();
        assert!(rows[3].starts_with(CURSOR_EMPTY));
        assert!(rows[4].starts_with(CURSOR));
        assert!(rows[5].starts_with(CURSOR_EMPTY));
    }

    #[test]
    fn test_message_count_shown_only_beyond_one_exchange() {
        let mut convs = conversations(2);
        let duplicated = convs[0].messages.clone();
        convs[0].messages.extend(duplicated);
        let screen = BrowseScreen::new(Layout::new(80), 10, convs);
        let rows: Vec<String> = screen
            .render(0)
            .iter()
            .map(|l| crate::term::strip_ansi(l))
            .collect();
        assert!(rows[3].contains("(4)"));
        assert!(!rows[4].contains('('));
    }

    #[test]
    fn test_long_preview_is_truncated_with_ellipsis() {
        let mut convs = conversations(1);
        convs[0].messages[0].content = "x".repeat(200);
        let screen = BrowseScreen::new(Layout::new(80), 10, convs);
        let rows: Vec<String> = screen
            .render(0)
            .iter()
            .map(|l| crate::term::strip_ansi(l))
            .collect();
        assert!(rows[3].contains("..."));
    }

    #[test]
    fn test_run_enter_selects_conversation_at_position() {
        let mut screen = BrowseScreen::new(Layout::new(80), 10, conversations(5));
        let mut term = FakeTerminal::new(vec![Key::Down, Key::Down, Key::Enter]);
        let outcome = screen.run(&mut term).unwrap();
        assert_eq!(outcome, BrowseOutcome::SelectedExisting("id-2".to_string()));
        // terminal transitions erase the whole block
        assert!(term.lines.is_empty());
        assert_eq!(term.cursor_hidden_depth(), 0);
        assert!(term.cursor_was_hidden());
    }

    #[test]
    fn test_run_tab_walks_pages_then_selects() {
        let mut screen = BrowseScreen::new(Layout::new(80), 10, conversations(23));
        let mut term = FakeTerminal::new(vec![Key::Tab, Key::Tab, Key::Enter]);
        let outcome = screen.run(&mut term).unwrap();
        assert_eq!(
            outcome,
            BrowseOutcome::SelectedExisting("id-20".to_string())
        );
    }

    #[test]
    fn test_run_quit_leaves_screen_clean() {
        let mut screen = BrowseScreen::new(Layout::new(80), 10, conversations(3));
        let mut term = FakeTerminal::new(vec![Key::Char('q')]);
        assert_eq!(screen.run(&mut term).unwrap(), BrowseOutcome::Quit);
        assert!(term.lines.is_empty());
    }

    #[test]
    fn test_run_new_chat_from_empty_store() {
        let mut screen = BrowseScreen::new(Layout::new(80), 10, vec![]);
        let mut term = FakeTerminal::new(vec![Key::Char('n')]);
        assert_eq!(screen.run(&mut term).unwrap(), BrowseOutcome::SelectedNew);
    }
}
