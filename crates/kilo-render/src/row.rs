#![forbid(unsafe_code)]

//! Document rows: raw text plus a derived display form.
//!
//! Each row keeps its authoritative characters (`raw`) and a separately
//! materialized `rendered` form in which every tab is expanded to enough
//! spaces to reach the next multiple of [`TAB_STOP`]. The expansion is
//! aligned to the row's cumulative display column, not the raw index, so a
//! tab after three characters advances five columns, not eight.
//!
//! `rendered` is derived state: any mutation of `raw` must regenerate it
//! before the row is next displayed. Positions are measured in characters,
//! one display column per non-tab character.

use memchr::memchr;

/// Tab stops are every 8 columns.
pub const TAB_STOP: usize = 8;

/// One line of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    raw: String,
    rendered: String,
}

impl Row {
    /// Build a row from one line of text, materializing its rendered form.
    pub fn new(raw: impl Into<String>) -> Self {
        let mut row = Self {
            raw: raw.into(),
            rendered: String::new(),
        };
        row.update_render();
        row
    }

    /// The authoritative characters of the line.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The display form, tabs expanded.
    #[must_use]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Number of raw characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.chars().count()
    }

    /// Whether the line has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Number of rendered display columns.
    #[must_use]
    pub fn render_len(&self) -> usize {
        self.rendered.chars().count()
    }

    /// Regenerate `rendered` from `raw`.
    ///
    /// Must run after any `raw` mutation. O(row length); rows without tabs
    /// take a copy-only fast path.
    pub fn update_render(&mut self) {
        if memchr(b'\t', self.raw.as_bytes()).is_none() {
            self.rendered.clear();
            self.rendered.push_str(&self.raw);
            return;
        }

        let mut rendered = String::with_capacity(self.raw.len() + TAB_STOP);
        let mut col = 0usize;
        for ch in self.raw.chars() {
            if ch == '\t' {
                rendered.push(' ');
                col += 1;
                while col % TAB_STOP != 0 {
                    rendered.push(' ');
                    col += 1;
                }
            } else {
                rendered.push(ch);
                col += 1;
            }
        }
        self.rendered = rendered;
    }

    /// Map a raw character index to its rendered column.
    ///
    /// Walks raw characters `[0, cx)`, advancing one column per character
    /// and up to the next tab stop per tab. This must agree exactly with
    /// [`Row::update_render`] or cursor placement desyncs from content.
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0usize;
        for ch in self.raw.chars().take(cx) {
            if ch == '\t' {
                rx += TAB_STOP - (rx % TAB_STOP);
            } else {
                rx += 1;
            }
        }
        rx
    }
}

/// The ordered sequence of rows plus the display label of what was loaded.
#[derive(Debug, Default)]
pub struct Document {
    rows: Vec<Row>,
    filename: Option<String>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row at the end, computing its rendered form immediately.
    pub fn append_row(&mut self, text: impl Into<String>) {
        self.rows.push(Row::new(text));
    }

    /// All rows in line order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The row at a line index, if it exists.
    #[must_use]
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the document holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display label, independent of storage path validity.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Set the display label.
    pub fn set_filename(&mut self, name: impl Into<String>) {
        self.filename = Some(name.into());
    }
}
