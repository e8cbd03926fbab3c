#![forbid(unsafe_code)]

//! Full-frame composition.
//!
//! [`refresh`] produces one complete screen update into a [`FrameBuffer`]:
//!
//! 1. Cursor-hide, then cursor-home.
//! 2. One line per visible text row: the rendered slice of the document row,
//!    or `~` past end-of-document (with a centered welcome banner at
//!    one-third of screen height while the document is empty), each followed
//!    by erase-to-end-of-line and a line break.
//! 3. An inverted-video status bar, exactly `screen.cols` wide.
//! 4. A message bar, cleared every frame and repopulated while the status
//!    message is fresh.
//! 5. Cursor placement at the viewport-relative position, then cursor-show.
//!
//! The caller flushes the buffer as a single write; nothing here touches the
//! terminal directly.

use std::io;
use std::time::{Duration, Instant};

use crate::ansi;
use crate::frame::FrameBuffer;
use crate::row::Document;
use crate::viewport::{Screen, Viewport};

/// How long a status message stays visible.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Version shown in the welcome banner.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// At most this many characters of the filename appear in the status bar.
const STATUS_NAME_WIDTH: usize = 20;

/// A transient status-bar message with its creation time.
///
/// Visibility is time-boxed: the message expires [`MESSAGE_TIMEOUT`] after
/// the last update rather than being cleared explicitly.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    since: Instant,
}

impl StatusMessage {
    /// Create a message stamped now.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            since: Instant::now(),
        }
    }

    /// Replace the message, resetting its clock.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.since = Instant::now();
    }

    /// The message text while it is still fresh.
    #[must_use]
    pub fn visible(&self) -> Option<&str> {
        (!self.text.is_empty() && self.since.elapsed() < MESSAGE_TIMEOUT)
            .then_some(self.text.as_str())
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::new("")
    }
}

/// Everything the renderer needs to compose one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameState<'a> {
    /// The document being displayed.
    pub doc: &'a Document,
    /// Current scroll offsets.
    pub viewport: Viewport,
    /// Visible text area.
    pub screen: Screen,
    /// Cursor row index.
    pub cy: usize,
    /// Cursor rendered column.
    pub rx: usize,
    /// Status-bar message.
    pub message: &'a StatusMessage,
}

/// Compose a complete frame into `buf`.
pub fn refresh(buf: &mut FrameBuffer, state: &FrameState<'_>) -> io::Result<()> {
    buf.push_bytes(ansi::CURSOR_HIDE);
    buf.push_bytes(ansi::CURSOR_HOME);

    draw_rows(buf, state);
    draw_status_bar(buf, state);
    draw_message_bar(buf, state);

    let row = (state.cy - state.viewport.rowoff) as u16;
    let col = (state.rx - state.viewport.coloff) as u16;
    ansi::cup(buf, row, col)?;

    buf.push_bytes(ansi::CURSOR_SHOW);

    #[cfg(feature = "tracing")]
    tracing::trace!(bytes = buf.len(), "frame composed");
    Ok(())
}

/// Draw the visible text rows.
fn draw_rows(buf: &mut FrameBuffer, state: &FrameState<'_>) {
    for y in 0..state.screen.rows {
        let filerow = y + state.viewport.rowoff;
        match state.doc.row(filerow) {
            Some(row) => {
                let visible: String = row
                    .rendered()
                    .chars()
                    .skip(state.viewport.coloff)
                    .take(state.screen.cols)
                    .collect();
                buf.push_str(&visible);
            }
            None => {
                if state.doc.is_empty() && y == state.screen.rows / 3 {
                    draw_welcome(buf, state.screen.cols);
                } else {
                    buf.push_str("~");
                }
            }
        }
        buf.push_bytes(ansi::ERASE_LINE_TAIL);
        buf.push_str("\r\n");
    }
}

/// Draw the centered welcome banner on an empty document.
fn draw_welcome(buf: &mut FrameBuffer, cols: usize) {
    let welcome = format!("Kilo editor -- version {VERSION}");
    let shown = welcome.len().min(cols);
    let mut padding = (cols - shown) / 2;
    if padding > 0 {
        buf.push_str("~");
        padding -= 1;
    }
    for _ in 0..padding {
        buf.push_str(" ");
    }
    buf.push_str(&welcome[..shown]);
}

/// Draw the inverted-video status bar, exactly `screen.cols` wide.
fn draw_status_bar(buf: &mut FrameBuffer, state: &FrameState<'_>) {
    buf.push_bytes(ansi::REVERSE_VIDEO);

    let name: String = state
        .doc
        .filename()
        .unwrap_or("[No Name]")
        .chars()
        .take(STATUS_NAME_WIDTH)
        .collect();
    let left = format!("{name} - {} lines", state.doc.num_rows());
    let right = format!("{}/{}", state.cy + 1, state.doc.num_rows());

    let mut len = left.chars().count().min(state.screen.cols);
    let clipped: String = left.chars().take(len).collect();
    buf.push_str(&clipped);

    let rlen = right.chars().count();
    while len < state.screen.cols {
        if state.screen.cols - len == rlen {
            buf.push_str(&right);
            break;
        }
        buf.push_str(" ");
        len += 1;
    }

    buf.push_bytes(ansi::SGR_RESET);
    buf.push_str("\r\n");
}

/// Draw the message bar: cleared every frame, populated only while fresh.
fn draw_message_bar(buf: &mut FrameBuffer, state: &FrameState<'_>) {
    buf.push_bytes(ansi::ERASE_LINE_TAIL);
    if let Some(msg) = state.message.visible() {
        let clipped: String = msg.chars().take(state.screen.cols).collect();
        buf.push_str(&clipped);
    }
}
