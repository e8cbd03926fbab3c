#![forbid(unsafe_code)]

//! Viewport scroll control.
//!
//! The viewport is the visible sub-rectangle of the document. Scrolling is
//! an exact minimal correction recomputed every frame from the cursor
//! position; there is no smooth scrolling and no incremental state beyond
//! the offsets themselves.

/// Terminal real estate available to document text, in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    /// Visible text rows (status and message bars excluded).
    pub rows: usize,
    /// Visible columns.
    pub cols: usize,
}

/// Top-left corner of the visible window into the document.
///
/// `rowoff` is a row index; `coloff` is a *rendered* column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible row.
    pub rowoff: usize,
    /// First visible rendered column.
    pub coloff: usize,
}

impl Viewport {
    /// Drag the window the minimal distance needed to contain the cursor.
    ///
    /// `cy` is the cursor row, `rx` its rendered column. After this call
    /// `rowoff <= cy < rowoff + screen.rows` and
    /// `coloff <= rx < coloff + screen.cols`.
    pub fn scroll(&mut self, cy: usize, rx: usize, screen: Screen) {
        if cy < self.rowoff {
            self.rowoff = cy;
        }
        if cy >= self.rowoff + screen.rows {
            self.rowoff = cy + 1 - screen.rows;
        }
        if rx < self.coloff {
            self.coloff = rx;
        }
        if rx >= self.coloff + screen.cols {
            self.coloff = rx + 1 - screen.cols;
        }
    }

    /// Whether the cursor position is inside the visible window.
    #[must_use]
    pub fn contains(&self, cy: usize, rx: usize, screen: Screen) -> bool {
        cy >= self.rowoff
            && cy < self.rowoff + screen.rows
            && rx >= self.coloff
            && rx < self.coloff + screen.cols
    }
}
