//! Animated "typewriter" text box.
//!
//! Text is streamed in with [`TextBox::append_text`], word-wrapped into a queue of atoms, and
//! revealed one atom per tick onto a fixed-size virtual screen. When the screen is full the
//! contents scroll up a row. Rendering copies the whole screen to a [`Canvas`] (or a ratatui
//! [`Buffer`]) every frame.
//!
//! The box owns no timer. The host either calls [`TextBox::tick`] from its own scheduler or
//! passes the current time to [`TextBox::advance`], which consults the embedded [`Ticker`].

pub mod buffer;
pub mod screen;
pub mod ticker;
pub mod tokenize;

use std::time::Duration;
use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::canvas::Canvas;
use crate::canvas::cell_width;
use crate::theme::Theme;
use crate::theme::ThemeSlot;

pub use buffer::TextAtom;
pub use buffer::TypewriterBuffer;
pub use screen::Reveal;
pub use screen::ScreenCursor;
pub use screen::VirtualTextScreen;
pub use ticker::Ticker;

#[derive(Clone, Debug)]
pub struct TextBoxOptions {
    pub width: u16,
    pub height: u16,
    /// Wrap column for appended text. Defaults to `width`.
    pub line_length: Option<u16>,
    pub tick_period: Duration,
    /// Style for atoms that carry no override, and for blank cells.
    pub style: Style,
    /// Upper bound on ticks run by a single [`TextBox::advance`] after a stall.
    pub max_catch_up: u32,
}

impl Default for TextBoxOptions {
    fn default() -> Self {
        Self {
            width: 40,
            height: 10,
            line_length: None,
            tick_period: Duration::from_millis(30),
            style: Style::default(),
            max_catch_up: 8,
        }
    }
}

impl TextBoxOptions {
    pub fn sized(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Takes the box style from `theme`'s [`ThemeSlot::TextBox`].
    pub fn themed(mut self, theme: &Theme) -> Self {
        self.style = theme.style(ThemeSlot::TextBox);
        self
    }
}

#[derive(Clone, Debug)]
pub struct TextBox {
    queue: TypewriterBuffer,
    screen: VirtualTextScreen,
    ticker: Ticker,
    style: Style,
}

impl Default for TextBox {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBox {
    pub fn new() -> Self {
        Self::with_options(TextBoxOptions::default())
    }

    pub fn with_options(options: TextBoxOptions) -> Self {
        let line_length = options.line_length.unwrap_or(options.width);
        tracing::debug!(
            width = options.width,
            height = options.height,
            line_length,
            period_ms = options.tick_period.as_millis() as u64,
            "text box created"
        );
        Self {
            queue: TypewriterBuffer::new(line_length),
            screen: VirtualTextScreen::new(options.width, options.height, options.style),
            ticker: Ticker::new(options.tick_period, options.max_catch_up),
            style: options.style,
        }
    }

    pub fn append(&mut self, text: &str) {
        self.append_text(text, None);
    }

    /// Queues `text` for reveal. `style` overrides the box style for these characters only.
    pub fn append_text(&mut self, text: &str, style: Option<Style>) {
        let queued = self.queue.append(text, style);
        tracing::trace!(queued, pending = self.queue.len(), "queued text");
    }

    /// Reveals one atom. Returns `None` when nothing was queued.
    pub fn tick(&mut self) -> Option<Reveal> {
        let atom = self.queue.pop()?;
        Some(self.screen.consume(atom, self.style))
    }

    /// Runs every tick the embedded ticker says is due at `now`. Returns how many atoms were
    /// revealed.
    pub fn advance(&mut self, now: Instant) -> usize {
        let due = self.ticker.poll(now);
        (0..due).map_while(|_| self.tick()).count()
    }

    /// Reveals everything still queued.
    pub fn flush(&mut self) -> usize {
        let mut n = 0;
        while self.tick().is_some() {
            n += 1;
        }
        n
    }

    /// Drops queued text, blanks the screen and homes both the reveal and wrap cursors.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.screen.reset(self.style);
    }

    pub fn tick_period(&self) -> Duration {
        self.ticker.period()
    }

    /// Takes effect on the next tick; queued text and the screen are untouched.
    pub fn set_tick_period(&mut self, period: Duration) {
        tracing::debug!(period_ms = period.as_millis() as u64, "tick period changed");
        self.ticker.set_period(period);
    }

    /// Stops [`TextBox::advance`] from revealing anything. [`TextBox::tick`] still works.
    pub fn pause(&mut self) {
        tracing::debug!(pending = self.queue.len(), "text box paused");
        self.ticker.pause();
    }

    pub fn resume(&mut self) {
        tracing::debug!(pending = self.queue.len(), "text box resumed");
        self.ticker.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.ticker.is_paused()
    }

    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        if self.queue.is_empty() {
            return None;
        }
        self.ticker.time_until_next(now)
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Used for atoms revealed from now on; cells already on screen keep their style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn cursor(&self) -> ScreenCursor {
        self.screen.cursor()
    }

    pub fn width(&self) -> u16 {
        self.screen.width()
    }

    pub fn height(&self) -> u16 {
        self.screen.height()
    }

    pub fn screen(&self) -> &VirtualTextScreen {
        &self.screen
    }

    pub fn queue(&self) -> &TypewriterBuffer {
        &self.queue
    }

    pub fn line(&self, row: u16) -> String {
        self.screen.row_text(row)
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.screen.height()).map(|r| self.line(r)).collect()
    }

    /// Copies the whole screen onto `canvas` with its top-left corner at `offset`.
    pub fn render(&self, canvas: &mut impl Canvas, offset: Position) {
        canvas.blit(self.screen.grid(), offset);
    }

    /// Draws into `area` of a ratatui buffer, clipping the screen to the area.
    pub fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.style);

        let grid = self.screen.grid();
        for y in 0..area.height.min(grid.height()) {
            for (x, cell) in grid.row(y).iter().take(area.width as usize).enumerate() {
                let x = x as u16;
                if !cell.covered && x.saturating_add(cell_width(cell.ch)) > area.width {
                    buf.write_char(area.x + x, area.y + y, ' ', cell.style);
                } else {
                    buf.put_cell(area.x + x, area.y + y, cell);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CellGrid;
    use ratatui::style::Color;

    fn boxed(width: u16, height: u16) -> TextBox {
        TextBox::with_options(TextBoxOptions::sized(width, height))
    }

    #[test]
    fn short_text_round_trips_onto_row_zero() {
        let mut tb = boxed(20, 2);
        tb.append("hello world");
        for _ in 0.."hello world".len() {
            assert_eq!(tb.tick(), Some(Reveal::Wrote));
        }
        assert_eq!(tb.line(0).trim_end(), "hello world");
        assert_eq!(tb.cursor(), ScreenCursor { col: 11, row: 0 });
        assert_eq!(tb.pending(), 1);
    }

    #[test]
    fn wrap_scenario_places_words_on_two_rows() {
        let mut tb = boxed(10, 2);
        tb.append("ab cd ef gh");
        let queued: String = tb.queue().iter().map(|a| a.ch).collect();
        assert_eq!(queued, "ab cd ef \ngh ");

        tb.flush();
        assert_eq!(tb.line(0), "ab cd ef  ");
        assert_eq!(tb.line(1), "gh        ");
        assert_eq!(tb.cursor(), ScreenCursor { col: 3, row: 1 });
    }

    #[test]
    fn full_width_word_at_column_zero_has_no_leading_break() {
        let mut tb = boxed(5, 2);
        tb.append("abcde");
        assert!(!tb.queue().peek().unwrap().is_newline());
        tb.flush();
        // the trailing space lands past the edge and is dropped
        assert_eq!(tb.lines(), ["abcde", "     "]);
        assert_eq!(tb.cursor(), ScreenCursor { col: 5, row: 0 });
    }

    #[test]
    fn full_width_word_after_text_starts_a_new_line() {
        let mut tb = boxed(5, 2);
        tb.append("a");
        tb.append("abcde");
        tb.flush();
        assert_eq!(tb.lines(), ["a    ", "abcde"]);
    }

    #[test]
    fn filling_the_screen_then_breaking_scrolls() {
        let mut tb = boxed(4, 2);
        tb.append("one \n two");
        tb.flush();
        assert_eq!(tb.lines(), ["one ", "two "]);

        tb.append("\n");
        assert_eq!(tb.tick(), Some(Reveal::Scrolled));
        assert_eq!(tb.lines(), ["two ", "    "]);
        assert_eq!(tb.cursor(), ScreenCursor { col: 0, row: 1 });
    }

    #[test]
    fn ticking_an_empty_queue_changes_nothing() {
        let mut tb = boxed(4, 2);
        tb.append("hi");
        tb.flush();
        let before = (tb.lines(), tb.cursor());
        for _ in 0..10 {
            assert_eq!(tb.tick(), None);
        }
        assert_eq!((tb.lines(), tb.cursor()), before);
    }

    #[test]
    fn overlong_words_overflow_without_corrupting_rows() {
        let mut tb = boxed(4, 3);
        tb.append("x abcdefg y");
        tb.flush();
        assert_eq!(tb.lines(), ["x   ", "abcd", "y   "]);
    }

    #[test]
    fn narrower_line_length_than_width_is_respected() {
        let mut tb = TextBox::with_options(TextBoxOptions {
            line_length: Some(6),
            ..TextBoxOptions::sized(10, 2)
        });
        tb.append("aa bb cc");
        tb.flush();
        assert_eq!(tb.lines(), ["aa bb     ", "cc        "]);
    }

    #[test]
    fn advance_respects_period_changes_and_pause() {
        let t0 = Instant::now();
        let mut tb = TextBox::with_options(TextBoxOptions {
            tick_period: Duration::from_millis(10),
            ..TextBoxOptions::sized(10, 1)
        });
        tb.append("abcdef");

        assert_eq!(tb.advance(t0), 0);
        assert_eq!(tb.advance(t0 + Duration::from_millis(20)), 2);

        tb.set_tick_period(Duration::from_millis(5));
        assert_eq!(tb.advance(t0 + Duration::from_millis(30)), 2);
        assert_eq!(tb.line(0).trim_end(), "abcd");

        tb.pause();
        assert_eq!(tb.advance(t0 + Duration::from_millis(500)), 0);
        assert_eq!(tb.pending(), 3);

        tb.resume();
        tb.advance(t0 + Duration::from_millis(500));
        assert_eq!(tb.advance(t0 + Duration::from_millis(505)), 1);
        assert_eq!(tb.line(0).trim_end(), "abcde");
    }

    #[test]
    fn zero_period_never_reveals_through_advance() {
        let t0 = Instant::now();
        let mut tb = TextBox::with_options(TextBoxOptions {
            tick_period: Duration::ZERO,
            ..TextBoxOptions::sized(10, 1)
        });
        tb.append("abc");
        tb.advance(t0);
        assert_eq!(tb.advance(t0 + Duration::from_secs(1)), 0);
        assert_eq!(tb.pending(), 4);
        assert_eq!(tb.time_until_next_tick(t0), None);
    }

    #[test]
    fn clear_resets_queue_screen_and_wrap_column() {
        let mut tb = boxed(6, 2);
        tb.append("abc def");
        tb.tick();
        tb.clear();
        assert!(tb.is_idle());
        assert_eq!(tb.cursor(), ScreenCursor::default());
        assert_eq!(tb.queue().virtual_column(), 0);
        assert_eq!(tb.lines(), ["      ", "      "]);
    }

    #[test]
    fn style_override_and_default_style() {
        let red = Style::default().fg(Color::Red);
        let green = Style::default().fg(Color::Green);
        let mut tb = TextBox::with_options(TextBoxOptions {
            style: green,
            ..TextBoxOptions::sized(6, 1)
        });
        tb.append_text("a", Some(red));
        tb.append("b");
        tb.flush();

        let grid = tb.screen().grid();
        assert_eq!(grid.cell(0, 0).unwrap().style, red);
        assert_eq!(grid.cell(2, 0).unwrap().style, green);
        assert_eq!(grid.cell(5, 0).unwrap().style, green);
    }

    #[test]
    fn themed_options_pick_the_text_box_slot() {
        let mut theme = Theme::new();
        let style = Style::default().fg(Color::Yellow);
        theme.set(ThemeSlot::TextBox, style).unwrap();
        let tb = TextBox::with_options(TextBoxOptions::sized(2, 1).themed(&theme));
        assert_eq!(tb.style(), style);
    }

    #[test]
    fn render_blits_the_screen_at_an_offset() {
        let mut tb = boxed(3, 1);
        tb.append("ok");
        tb.flush();

        let mut canvas = CellGrid::new(5, 2);
        tb.render(&mut canvas, Position::new(1, 1));
        assert_eq!(canvas.row_text(0), "     ");
        assert_eq!(canvas.row_text(1), " ok  ");
    }

    #[test]
    fn render_ref_clips_to_area() {
        let mut tb = boxed(6, 2);
        tb.append("abcd");
        tb.flush();

        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        tb.render_ref(Rect::new(1, 0, 3, 5), &mut buf);
        let row: String = (0..4)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(row, " abc");
    }

    #[test]
    fn wide_words_wrap_by_display_width() {
        let mut tb = boxed(6, 2);
        tb.append("ab 你好");
        tb.flush();
        assert_eq!(tb.lines(), ["ab    ", "你好  "]);
        assert_eq!(tb.cursor(), ScreenCursor { col: 5, row: 1 });

        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        tb.render_ref(buf.area, &mut buf);
        let symbols: Vec<_> = (0..6)
            .map(|x| buf.cell((x, 1)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(symbols, ["你", "", "好", "", " ", " "]);
    }

    #[test]
    fn render_ref_blanks_a_wide_glyph_cut_by_the_area() {
        let mut tb = boxed(4, 1);
        tb.append("a你");
        tb.flush();

        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        tb.render_ref(Rect::new(0, 0, 2, 1), &mut buf);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "a");
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), " ");
    }
}
