//! Character-cell drawing surface shared by the widgets and their backing grids.
//!
//! [`Canvas`] is implemented for [`ratatui::buffer::Buffer`] (the real backend) and for
//! [`CellGrid`], the fixed-size off-screen grid widgets compose into before blitting.

use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

pub trait Canvas {
    /// Writes one cell. Positions outside the canvas are ignored.
    fn write_char(&mut self, x: u16, y: u16, ch: char, style: Style);

    /// Marks `(x, y)` as the trailing half of the wide glyph written just left of it.
    fn write_continuation(&mut self, x: u16, y: u16, style: Style);

    fn put_cell(&mut self, x: u16, y: u16, cell: &ScreenCell) {
        if cell.covered {
            self.write_continuation(x, y, cell.style);
        } else {
            self.write_char(x, y, cell.ch, cell.style);
        }
    }

    /// Moves every row up by `delta` (down when negative). Rows scrolled in are blank.
    fn scroll_rows(&mut self, delta: i16);

    fn clear(&mut self);

    /// Copies `source` with its top-left cell at `dest`.
    fn blit(&mut self, source: &CellGrid, dest: Position) {
        for y in 0..source.height() {
            let Some(dy) = dest.y.checked_add(y) else {
                return;
            };
            for (x, cell) in source.row(y).iter().enumerate() {
                let Some(dx) = dest.x.checked_add(x as u16) else {
                    break;
                };
                self.put_cell(dx, dy, cell);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenCell {
    pub ch: char,
    pub style: Style,
    /// Set on the cell a double-width glyph to the left spills into; `ch` is unused.
    pub covered: bool,
}

impl ScreenCell {
    pub fn new(ch: char, style: Style) -> Self {
        Self {
            ch,
            style,
            covered: false,
        }
    }

    pub fn blank(style: Style) -> Self {
        Self::new(' ', style)
    }

    pub fn continuation(style: Style) -> Self {
        Self {
            ch: ' ',
            style,
            covered: true,
        }
    }
}

impl Default for ScreenCell {
    fn default() -> Self {
        Self::blank(Style::default())
    }
}

/// Fixed-size grid of cells whose rows form a ring, so scrolling by one row only blanks a single
/// row instead of moving the whole grid.
#[derive(Clone, Debug)]
pub struct CellGrid {
    cells: Vec<ScreenCell>,
    width: u16,
    height: u16,
    top: usize,
    fill: ScreenCell,
}

impl CellGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_fill(width, height, Style::default())
    }

    pub fn with_fill(width: u16, height: u16, style: Style) -> Self {
        let fill = ScreenCell::blank(style);
        Self {
            cells: vec![fill; width as usize * height as usize],
            width,
            height,
            top: 0,
            fill,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn fill_style(&self) -> Style {
        self.fill.style
    }

    pub fn set_fill_style(&mut self, style: Style) {
        self.fill = ScreenCell::blank(style);
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&ScreenCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.physical_row(y) + x as usize)
    }

    /// Row `y` in visible order. Out-of-range rows are empty.
    pub fn row(&self, y: u16) -> &[ScreenCell] {
        if y >= self.height {
            return &[];
        }
        let start = self.physical_row(y);
        &self.cells[start..start + self.width as usize]
    }

    /// Row `y` as text. Cells covered by a wide glyph contribute nothing.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|c| !c.covered)
            .map(|c| c.ch)
            .collect()
    }

    fn physical_row(&self, y: u16) -> usize {
        let h = self.height as usize;
        ((self.top + y as usize) % h) * self.width as usize
    }

    fn blank_physical(&mut self, physical: usize) {
        let w = self.width as usize;
        let start = physical * w;
        self.cells[start..start + w].fill(self.fill);
    }
}

impl Canvas for CellGrid {
    fn write_char(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.physical_row(y) + x as usize;
        self.cells[i] = ScreenCell::new(ch, style);
    }

    fn write_continuation(&mut self, x: u16, y: u16, style: Style) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.physical_row(y) + x as usize;
        self.cells[i] = ScreenCell::continuation(style);
    }

    fn scroll_rows(&mut self, delta: i16) {
        let h = self.height as usize;
        if delta == 0 || h == 0 {
            return;
        }
        let n = delta.unsigned_abs() as usize;
        if n >= h {
            self.clear();
            return;
        }
        for _ in 0..n {
            if delta > 0 {
                let old_top = self.top;
                self.top = (self.top + 1) % h;
                self.blank_physical(old_top);
            } else {
                self.top = (self.top + h - 1) % h;
                self.blank_physical(self.top);
            }
        }
    }

    fn clear(&mut self) {
        self.cells.fill(self.fill);
        self.top = 0;
    }
}

/// Characters without a cell width of their own (controls, combining marks) are drawn as spaces.
fn printable(ch: char) -> char {
    match UnicodeWidthChar::width(ch) {
        Some(w) if w > 0 => ch,
        _ => ' ',
    }
}

/// Terminal columns `ch` covers once drawn. Anything [`printable`] blanks takes one.
pub fn cell_width(ch: char) -> u16 {
    match UnicodeWidthChar::width(ch) {
        Some(w) if w > 0 => w as u16,
        _ => 1,
    }
}

impl Canvas for Buffer {
    fn write_char(&mut self, x: u16, y: u16, ch: char, style: Style) {
        // a wide glyph with no room for its second half is blanked
        let fits = x.saturating_add(cell_width(ch)) <= self.area.right();
        if let Some(cell) = self.cell_mut((x, y)) {
            let ch = if fits { printable(ch) } else { ' ' };
            cell.set_char(ch).set_style(style);
        }
    }

    fn write_continuation(&mut self, x: u16, y: u16, style: Style) {
        if let Some(cell) = self.cell_mut((x, y)) {
            cell.set_symbol("").set_style(style);
        }
    }

    fn scroll_rows(&mut self, delta: i16) {
        let w = self.area.width as usize;
        let h = self.area.height as usize;
        if delta == 0 || w == 0 || h == 0 {
            return;
        }
        let n = delta.unsigned_abs() as usize;
        if n >= h {
            self.reset();
            return;
        }
        if delta > 0 {
            self.content.rotate_left(n * w);
            for cell in &mut self.content[(h - n) * w..] {
                cell.reset();
            }
        } else {
            self.content.rotate_right(n * w);
            for cell in &mut self.content[..n * w] {
                cell.reset();
            }
        }
    }

    fn clear(&mut self) {
        self.reset();
    }
}
