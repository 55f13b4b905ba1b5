//! Terminal primitives for Hey
//!
//! Raw single-keypress reads, cursor movement and line clearing,
//! ANSI-aware width measurement, and centered layout. The interactive
//! screens depend only on the [`Terminal`] capability trait so they can be
//! driven by a fake in tests.

use crate::error::{HeyError, Result};
use crossterm::cursor::{Hide, MoveToPreviousLine, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use regex::Regex;
use std::io::Write;
use std::sync::OnceLock;

/// One logical key event from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Escape,
    Char(char),
}

/// Terminal capability interface
///
/// Everything the Browse and Chat screens need from a tty: blocking key
/// events, line input, line-oriented output, erasing previously drawn
/// blocks, and cursor visibility. The production implementation is
/// [`AnsiTerminal`]; tests use a fake that records drawn output and
/// replays scripted keys.
pub trait Terminal {
    /// Block until one logical key event is available; no echo
    fn read_key(&mut self) -> Result<Key>;

    /// Read one line of input with line editing; `None` on end-of-input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Print one line followed by a newline
    fn print(&mut self, line: &str);

    /// Move the cursor up one line and clear it, `n` times
    ///
    /// `n` must exactly match the number of lines the prior draw occupied
    /// or the screen corrupts; callers derive it from the content they
    /// just drew, never from a hardcoded constant.
    fn clear_lines(&mut self, n: usize);

    /// Hide the cursor
    fn hide_cursor(&mut self);

    /// Show the cursor
    fn show_cursor(&mut self);
}

/// Real terminal backed by crossterm and rustyline
pub struct AnsiTerminal {
    stdout: std::io::Stdout,
    editor: rustyline::DefaultEditor,
}

impl AnsiTerminal {
    /// Create a terminal wrapping stdout and a line editor
    pub fn new() -> Result<Self> {
        let editor = rustyline::DefaultEditor::new()
            .map_err(|e| HeyError::Terminal(format!("failed to initialise line editor: {}", e)))?;
        Ok(Self {
            stdout: std::io::stdout(),
            editor,
        })
    }
}

/// Map a crossterm key event to a logical [`Key`]
///
/// Ctrl+C arrives as an ordinary key event while raw mode is active; it is
/// mapped to Escape so the browse screen treats it as quit.
fn map_key_event(event: &KeyEvent) -> Option<Key> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Key::Escape),
            _ => None,
        };
    }
    match event.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

impl Terminal for AnsiTerminal {
    fn read_key(&mut self) -> Result<Key> {
        // Raw mode is scoped around the single read so ordinary printing
        // elsewhere keeps cooked-mode line discipline.
        enable_raw_mode().map_err(|e| HeyError::Terminal(format!("raw mode failed: {}", e)))?;
        let key = loop {
            match event::read() {
                Ok(Event::Key(event)) if event.kind != KeyEventKind::Release => {
                    if let Some(key) = map_key_event(&event) {
                        break Ok(key);
                    }
                }
                Ok(_) => continue,
                Err(e) => break Err(HeyError::Terminal(format!("key read failed: {}", e))),
            }
        };
        let _ = disable_raw_mode();
        Ok(key?)
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(rustyline::error::ReadlineError::Eof)
            | Err(rustyline::error::ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(HeyError::Terminal(format!("input error: {}", e)).into()),
        }
    }

    fn print(&mut self, line: &str) {
        let _ = writeln!(self.stdout, "{}", line);
        let _ = self.stdout.flush();
    }

    fn clear_lines(&mut self, n: usize) {
        for _ in 0..n {
            let _ = execute!(
                self.stdout,
                MoveToPreviousLine(1),
                Clear(ClearType::CurrentLine)
            );
        }
        let _ = self.stdout.flush();
    }

    fn hide_cursor(&mut self) {
        let _ = execute!(self.stdout, Hide);
    }

    fn show_cursor(&mut self) {
        let _ = execute!(self.stdout, Show);
    }
}

/// Run a closure with the cursor hidden, restoring it on every exit path
///
/// The scoped-resource contract for cursor visibility: hide on acquire,
/// show on release, release on both the ok and error paths. Abnormal
/// termination is covered by [`install_interrupt_hook`].
pub fn with_hidden_cursor<T, F>(term: &mut dyn Terminal, f: F) -> Result<T>
where
    F: FnOnce(&mut dyn Terminal) -> Result<T>,
{
    term.hide_cursor();
    let result = f(term);
    term.show_cursor();
    result
}

/// Install the interrupt handler that force-restores the terminal
///
/// On Ctrl+C outside raw mode the process must not leave the cursor
/// hidden: the handler writes the show-cursor sequence, drops raw mode,
/// and terminates. Best-effort cleanup, not a graceful shutdown.
pub fn install_interrupt_hook() -> Result<()> {
    ctrlc::set_handler(|| {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x1b[?25h");
        let _ = stdout.flush();
        let _ = disable_raw_mode();
        std::process::exit(130);
    })
    .map_err(|e| HeyError::Terminal(format!("failed to install interrupt handler: {}", e)))?;
    Ok(())
}

/// CSI-style escape sequence pattern used for width measurement
fn ansi_escape() -> &'static Regex {
    static ANSI_ESCAPE: OnceLock<Regex> = OnceLock::new();
    ANSI_ESCAPE.get_or_init(|| Regex::new(r"\x1B[@-_][0-?]*[ -/]*[@-~]").expect("valid pattern"))
}

/// Strip ANSI escape sequences from a string
pub fn strip_ansi(s: &str) -> String {
    ansi_escape().replace_all(s, "").into_owned()
}

/// Count the visible characters of a string, ignoring ANSI styling
///
/// Layout arithmetic goes through this so color codes never distort
/// column math.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/// Pad a string symmetrically so it appears centered within `cols`
pub fn center(s: &str, cols: usize) -> String {
    let pad = " ".repeat(cols.saturating_sub(visible_width(s)) / 2);
    format!("{}{}{}", pad, s, pad)
}
