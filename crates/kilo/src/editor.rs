#![forbid(unsafe_code)]

//! Editor state and the input dispatcher.
//!
//! [`Editor`] owns the document, cursor, viewport, and status message; no
//! state lives outside it. The dispatcher maps decoded keys to cursor
//! movements, the refresh step recomputes scroll offsets from scratch and
//! composes one frame.
//!
//! Cursor coordinates: `cx` indexes the raw characters of the current row,
//! `cy` the row (`num_rows` meaning "past the last line"). The rendered
//! column `rx` is derived from `cx` each frame, never stored.

use std::fs;
use std::io::{self, Write};

use kilo_core::event::{KeyCode, KeyEvent};
use kilo_core::input::KeyReader;
use kilo_render::draw::{self, FrameState, StatusMessage};
use kilo_render::frame::FrameBuffer;
use kilo_render::row::{Document, Row};
use kilo_render::viewport::{Screen, Viewport};

/// Rows reserved at the bottom for the status and message bars.
const RESERVED_ROWS: usize = 2;

/// Initial frame buffer allocation; a frame larger than this just grows it.
const FRAME_CAPACITY: usize = 16 * 1024;

/// What the dispatcher decided about the editor's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep running.
    Continue,
    /// Quit was requested.
    Quit,
}

/// Owned editor state: document, cursor, viewport, and status message.
#[derive(Debug)]
pub struct Editor {
    doc: Document,
    cx: usize,
    cy: usize,
    viewport: Viewport,
    screen: Screen,
    message: StatusMessage,
}

impl Editor {
    /// Create an editor with an empty document for a `cols` x `rows`
    /// terminal. The bottom [`RESERVED_ROWS`] rows are kept for the bars.
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            doc: Document::new(),
            cx: 0,
            cy: 0,
            viewport: Viewport::default(),
            screen: Screen {
                rows: (rows as usize).saturating_sub(RESERVED_ROWS),
                cols: cols as usize,
            },
            message: StatusMessage::new("HELP: Ctrl-Q = quit"),
        }
    }

    /// Load `path` into the document, replacing nothing: rows append to the
    /// current (empty) document in file order, newline-stripped.
    ///
    /// # Errors
    ///
    /// Open or read failure is fatal to the caller; there is no fallback
    /// once a filename was explicitly requested.
    pub fn open(&mut self, path: &str) -> io::Result<()> {
        let text = fs::read_to_string(path)?;
        self.doc.set_filename(path);
        for line in text.lines() {
            self.doc.append_row(line);
        }
        tracing::info!(path, rows = self.doc.num_rows(), "opened file");
        Ok(())
    }

    /// The document being edited.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access to the document.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Cursor position as `(cx, cy)`.
    #[must_use]
    pub fn cursor(&self) -> (usize, usize) {
        (self.cx, self.cy)
    }

    /// Current scroll offsets.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Visible text area.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Replace the status message, resetting its expiry clock.
    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.message.set(text);
    }

    /// Apply one decoded key.
    pub fn process_key(&mut self, key: KeyEvent) -> Step {
        if key.ctrl() && key.is_char('q') {
            return Step::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.move_cursor(key.code);
            }
            KeyCode::Home => self.cx = 0,
            KeyCode::End => {
                if self.cy < self.doc.num_rows() {
                    self.cx = self.current_row_len();
                }
            }
            KeyCode::PageUp | KeyCode::PageDown => self.page(key.code),
            // No editing in this version; everything else is a no-op.
            _ => {}
        }
        Step::Continue
    }

    /// Recompute scroll offsets and compose one frame into `buf`.
    pub fn refresh(&mut self, buf: &mut FrameBuffer) -> io::Result<()> {
        let rx = self.rx();
        self.viewport.scroll(self.cy, rx, self.screen);
        let state = FrameState {
            doc: &self.doc,
            viewport: self.viewport,
            screen: self.screen,
            cy: self.cy,
            rx,
            message: &self.message,
        };
        draw::refresh(buf, &state)
    }

    /// Run the read/dispatch/render loop until quit.
    ///
    /// # Errors
    ///
    /// Propagates unrecoverable input-stream and terminal-write failures.
    pub fn run<W: Write>(&mut self, keys: &mut KeyReader, out: &mut W) -> io::Result<()> {
        let mut buf = FrameBuffer::with_capacity(FRAME_CAPACITY);
        loop {
            self.refresh(&mut buf)?;
            buf.flush_to(out)?;

            let key = keys.read_key()?;
            if self.process_key(key) == Step::Quit {
                tracing::info!("quit requested");
                return Ok(());
            }
        }
    }

    fn current_row(&self) -> Option<&Row> {
        self.doc.row(self.cy)
    }

    fn current_row_len(&self) -> usize {
        self.current_row().map_or(0, Row::len)
    }

    /// Rendered cursor column for the current row (0 past the last line).
    fn rx(&self) -> usize {
        self.current_row().map_or(0, |row| row.cx_to_rx(self.cx))
    }

    /// Single-step cursor movement.
    fn move_cursor(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    // Wrap to the end of the previous row.
                    self.cy -= 1;
                    self.cx = self.current_row_len();
                }
            }
            KeyCode::Right => {
                if let Some(row) = self.current_row() {
                    if self.cx < row.len() {
                        self.cx += 1;
                    } else {
                        // Wrap to the start of the next row.
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            KeyCode::Up => {
                if self.cy > 0 {
                    self.cy -= 1;
                }
            }
            KeyCode::Down => {
                if self.cy < self.doc.num_rows() {
                    self.cy += 1;
                }
            }
            _ => {}
        }

        // Rows differ in length; snap back inside the landing row. Losing
        // the horizontal position here is intended, not an error.
        let len = self.current_row_len();
        if self.cx > len {
            self.cx = len;
        }
    }

    /// Page movement: jump to the window edge, then replay a screenful of
    /// single steps so row-length clamping stays consistent.
    fn page(&mut self, code: KeyCode) {
        let step = if code == KeyCode::PageUp {
            self.cy = self.viewport.rowoff;
            KeyCode::Up
        } else {
            self.cy = (self.viewport.rowoff + self.screen.rows)
                .saturating_sub(1)
                .min(self.doc.num_rows());
            KeyCode::Down
        };
        for _ in 0..self.screen.rows {
            self.move_cursor(step);
        }
    }
}
