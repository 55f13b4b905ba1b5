//! Render layer for Hey
//!
//! Turns messages and timestamps into styled, width-constrained terminal
//! blocks: the assistant block (timestamp plus rendered markdown body) and
//! the user bubble (right-aligned bordered frame). Prose-to-ANSI
//! conversion is delegated to an external markdown process; its failures
//! degrade to raw text because the renderer is purely presentational.

use crate::error::{HeyError, Result};
use crate::term::visible_width;
use colored::Colorize;
use std::io::Write;
use std::process::{Command, Stdio};

/// Columns reserved around a wrapped message bubble.
const WRAP_MARGIN: usize = 10;

/// Inner padding of the user bubble: border glyphs plus surrounding spaces.
const BUBBLE_INNER: usize = 4;

/// Terminal geometry captured once at startup
///
/// Threaded explicitly into every layout-computing component so tests can
/// run with a fixed width; layout math assumes the value stays constant
/// for the process lifetime (no live-resize handling).
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// Total terminal columns
    pub cols: usize,
}

impl Layout {
    /// A layout with an explicit column count
    pub const fn new(cols: usize) -> Self {
        Self { cols }
    }

    /// Query the terminal for its column count, defaulting to 80
    pub fn detect() -> Self {
        let cols = crossterm::terminal::size()
            .map(|(cols, _rows)| cols as usize)
            .unwrap_or(80);
        Self { cols }
    }

    /// Standard wrapping width for message bodies
    pub fn msg_width(&self) -> usize {
        self.cols.saturating_sub(WRAP_MARGIN)
    }
}

/// Markdown render capability
///
/// `render` converts prose to ANSI-styled text at a target width.
pub trait Markdown {
    fn render(&self, text: &str, width: usize) -> Result<String>;
}

/// Markdown renderer shelling out to glow
///
/// The text is piped through the external process with a width argument.
/// A non-zero exit still yields the best-effort partial output; only a
/// failure to run the process at all is reported as an error.
pub struct GlowRenderer {
    bin: String,
    style: String,
}

impl GlowRenderer {
    pub fn new(bin: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            style: style.into(),
        }
    }
}

impl Markdown for GlowRenderer {
    fn render(&self, text: &str, width: usize) -> Result<String> {
        let args = [
            "-s".to_string(),
            self.style.clone(),
            format!("-w{}", width),
        ];
        let output = pipe_through(&self.bin, &args, text.trim())?;
        if !output.status.success() {
            tracing::warn!(status = %output.status, "markdown renderer exited non-zero");
        }

        let rendered = String::from_utf8_lossy(&output.stdout);

        // glow indents every line by two spaces; drop the first occurrence
        let formatted: Vec<String> = rendered
            .lines()
            .map(|line| line.replacen("  ", "", 1))
            .collect();
        Ok(formatted.join("\n").trim().to_string())
    }
}

/// Run a command with `input` piped to its stdin, collecting its output
///
/// Stdin is fed from a separate thread: a message larger than the pipe
/// buffer would otherwise deadlock against a child that emits output
/// before draining its input.
fn pipe_through(bin: &str, args: &[String], input: &str) -> Result<std::process::Output> {
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| HeyError::Render(format!("failed to run {}: {}", bin, e)))?;

    let stdin = child.stdin.take();
    let payload = input.as_bytes().to_vec();
    let writer = std::thread::spawn(move || {
        if let Some(mut stdin) = stdin {
            let _ = stdin.write_all(&payload);
        }
    });

    let output = child
        .wait_with_output()
        .map_err(|e| HeyError::Render(format!("{} did not finish: {}", bin, e)))?;
    let _ = writer.join();
    Ok(output)
}

/// Current time in milliseconds since the epoch
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format an epoch-milliseconds timestamp like `02 Mar'26 04:05pm`
pub fn format_datetime(ms: i64) -> String {
    local_time(ms).format("%d %b'%y %I:%M%P").to_string()
}

/// Format an epoch-milliseconds timestamp like `02 Mar'26`
pub fn format_date(ms: i64) -> String {
    local_time(ms).format("%d %b'%y").to_string()
}

fn local_time(ms: i64) -> chrono::DateTime<chrono::Local> {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(ms)
        .unwrap_or(chrono::DateTime::UNIX_EPOCH)
        .with_timezone(&chrono::Local)
}

/// Message block renderer
///
/// Owns the layout and the markdown capability; produces the lines each
/// screen prints, so screens can erase exactly what they drew.
pub struct Renderer<'a> {
    layout: Layout,
    markdown: &'a dyn Markdown,
}

impl<'a> Renderer<'a> {
    pub fn new(layout: Layout, markdown: &'a dyn Markdown) -> Self {
        Self { layout, markdown }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Width requested from the markdown renderer
    ///
    /// Short single-width messages get a width that hugs the text; long
    /// ones wrap at the standard width; `no_wrap` (one-shot replies) uses
    /// the full terminal.
    fn request_width(&self, msg: &str, no_wrap: bool) -> usize {
        if no_wrap {
            return self.layout.cols;
        }
        let len = msg.trim().chars().count();
        if len > self.layout.msg_width() {
            self.layout.msg_width()
        } else {
            len + 4
        }
    }

    /// Render prose to ANSI text, degrading to the raw text on failure
    pub fn markdown(&self, msg: &str, no_wrap: bool) -> String {
        let width = self.request_width(msg, no_wrap);
        match self.markdown.render(msg, width) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::warn!("markdown renderer unavailable, printing raw text: {}", e);
                msg.trim().to_string()
            }
        }
    }

    /// Assistant block: separator, styled timestamp, markdown body
    pub fn assistant_block(&self, msg: &str, time_ms: i64) -> Vec<String> {
        let body = self.markdown(msg, false);
        self.assistant_frame(&body, time_ms)
    }

    /// Assistant frame around pre-rendered body text
    ///
    /// Used for the goodbye line and the thinking placeholder, which skip
    /// the markdown pass.
    pub fn assistant_frame(&self, body: &str, time_ms: i64) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            format!("{}", format!("{} ", format_datetime(time_ms)).yellow()),
        ];
        for line in body.split('\n') {
            lines.push(line.to_string());
        }
        lines
    }

    /// User bubble: right-aligned bordered frame with the timestamp
    /// embedded in the top border
    pub fn user_block(&self, msg: &str, time_ms: i64) -> Vec<String> {
        let md = self.markdown(msg, false);
        let time_str = format_datetime(time_ms).blue().to_string();

        let time_width = visible_width(&time_str);
        let multiline = md.contains('\n');
        let text_width = if multiline {
            self.layout.msg_width().saturating_sub(BUBBLE_INNER)
        } else {
            visible_width(&md)
        };
        let bubble_width = time_width.max(text_width);

        let time_padding = "─".repeat(bubble_width - time_width);
        let text_padding = " ".repeat(bubble_width - text_width);
        let bubble_padding =
            " ".repeat(self.layout.cols.saturating_sub(bubble_width + BUBBLE_INNER));

        let mut lines = vec![String::new()];
        lines.push(format!(
            "{} {}{}",
            format!("{}╭{}", bubble_padding, time_padding).blue(),
            time_str,
            " ╮".blue()
        ));
        if multiline {
            for line in md.split('\n') {
                lines.push(format!(
                    "{}{}{}{}",
                    bubble_padding,
                    "│ ".blue(),
                    line,
                    " │".blue()
                ));
            }
        } else {
            lines.push(format!(
                "{}{}{}{}{}",
                bubble_padding,
                "│ ".blue(),
                text_padding,
                md,
                " │".blue()
            ));
        }
        lines.push(format!(
            "{}",
            format!("{}╰─{}─╯", bubble_padding, "─".repeat(bubble_width)).blue()
        ));
        lines
    }

    /// Centered title bar shown at the top of the chat screen
    pub fn chat_title(&self, created_ms: Option<i64>) -> String {
        let centre = match created_ms {
            Some(ms) => format!(" Chat from {} ", format_date(ms)),
            None => " New Chat ".to_string(),
        };
        let bar = " ".repeat(self.layout.cols.saturating_sub(centre.chars().count()) / 2);
        format!("{}", format!("{}{}{}", bar, centre, bar).bright_black())
    }
}
