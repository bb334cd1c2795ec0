use ratatui::style::Style;

use super::buffer::TextAtom;
use crate::canvas::Canvas;
use crate::canvas::CellGrid;
use crate::canvas::cell_width;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenCursor {
    pub col: u16,
    pub row: u16,
}

/// What consuming one atom did to the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    Wrote,
    LineBreak,
    Scrolled,
    Dropped,
}

/// The revealed part of a text box: a fixed grid plus the reveal cursor.
///
/// `col` may sit one past the last column after a full line; anything written there is dropped
/// until the next line break.
#[derive(Clone, Debug)]
pub struct VirtualTextScreen {
    grid: CellGrid,
    cursor: ScreenCursor,
}

impl VirtualTextScreen {
    pub fn new(width: u16, height: u16, fill: Style) -> Self {
        Self {
            grid: CellGrid::with_fill(width, height, fill),
            cursor: ScreenCursor::default(),
        }
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn cursor(&self) -> ScreenCursor {
        self.cursor
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn row_text(&self, row: u16) -> String {
        self.grid.row_text(row)
    }

    pub fn consume(&mut self, atom: TextAtom, default_style: Style) -> Reveal {
        if atom.is_newline() {
            return self.line_break();
        }

        let ScreenCursor { col, row } = self.cursor;
        let width = self.grid.width();
        let w = cell_width(atom.ch);
        if col.saturating_add(w) > width || row >= self.grid.height() {
            tracing::trace!(col, row, ch = ?atom.ch, "dropped character past the right edge");
            // a wide glyph that would straddle the edge closes the line
            self.cursor.col = width;
            return Reveal::Dropped;
        }

        let style = atom.style.unwrap_or(default_style);
        self.grid.write_char(col, row, atom.ch, style);
        for dx in 1..w {
            self.grid.write_continuation(col + dx, row, style);
        }
        self.cursor.col += w;
        Reveal::Wrote
    }

    fn line_break(&mut self) -> Reveal {
        self.cursor.col = 0;
        let height = self.grid.height();
        if height == 0 {
            return Reveal::Dropped;
        }
        if self.cursor.row + 1 < height {
            self.cursor.row += 1;
            return Reveal::LineBreak;
        }
        self.grid.scroll_rows(1);
        self.cursor.row = height - 1;
        tracing::trace!(height, "text box scrolled");
        Reveal::Scrolled
    }

    /// Blanks every cell with `fill` and homes the cursor.
    pub fn reset(&mut self, fill: Style) {
        self.grid.set_fill_style(fill);
        self.grid.clear();
        self.cursor = ScreenCursor::default();
    }
}
