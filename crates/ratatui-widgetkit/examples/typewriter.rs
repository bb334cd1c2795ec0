use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_widgetkit::TextBox;
use ratatui_widgetkit::TextBoxOptions;
use ratatui_widgetkit::Theme;
use ratatui_widgetkit::ThemeSlot;
use std::io;
use std::time::Duration;
use std::time::Instant;

const BOX_W: u16 = 48;
const BOX_H: u16 = 12;

const PARAGRAPHS: &[&str] = &[
    "You wake in a small stone room. A single candle flickers on the table, and the door to the north is slightly ajar. \n ",
    "Somewhere below, water drips onto metal; the sound is slow, patient and very far away. \n ",
    "A voice calls out: \"Is anyone there?\" It sounds tired, but not unfriendly. \n ",
    "You pick up the candle. The shadows shift, and for a moment the walls look like they are breathing. \n ",
];

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let window = Theme::new()
        .with(ThemeSlot::Border, Style::default().fg(Color::Yellow))
        .map_err(io::Error::other)?;
    let mut theme = window.snapshot();
    theme
        .set(ThemeSlot::TextBox, Style::default().fg(Color::White))
        .map_err(io::Error::other)?;

    let mut text_box = TextBox::with_options(
        TextBoxOptions {
            tick_period: Duration::from_millis(40),
            ..TextBoxOptions::sized(BOX_W, BOX_H)
        }
        .themed(&theme),
    );

    let res = run(&mut terminal, &theme, &mut text_box);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    text_box: &mut TextBox,
) -> io::Result<()> {
    let mut next_paragraph = 0usize;
    let accent = theme.style(ThemeSlot::Accent);

    loop {
        text_box.advance(Instant::now());

        terminal.draw(|f| {
            let area = f.area();
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(area);

            let outer = centered(main, BOX_W + 2, BOX_H + 2);
            let block = Block::default()
                .title(Span::styled(
                    "TextBox (n: next, space: pause, +/-: speed, f: flush, c: clear, q)",
                    theme.style(ThemeSlot::Title),
                ))
                .borders(Borders::ALL)
                .border_style(theme.style(ThemeSlot::Border));
            let inner = block.inner(outer);
            f.render_widget(block, outer);

            let buf = f.buffer_mut();
            text_box.render_ref(inner, buf);

            let state = if text_box.is_paused() { "paused" } else { "running" };
            let status_line = format!(
                "{state}  speed={}ms  pending={}",
                text_box.tick_period().as_millis(),
                text_box.pending()
            );
            let status_span = Span::styled(status_line, theme.style(ThemeSlot::TextMuted));
            buf.set_span(status.x, status.y, &status_span, status.width);
        })?;

        let timeout = text_box
            .time_until_next_tick(Instant::now())
            .unwrap_or(Duration::from_millis(250))
            .min(Duration::from_millis(250));
        if !crossterm::event::poll(timeout)? {
            continue;
        }
        let Event::Key(key) = crossterm::event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('n') => {
                let text = PARAGRAPHS[next_paragraph % PARAGRAPHS.len()];
                let style = (next_paragraph % 2 == 1).then_some(accent);
                text_box.append_text(text, style);
                next_paragraph += 1;
            }
            KeyCode::Char(' ') => {
                if text_box.is_paused() {
                    text_box.resume();
                } else {
                    text_box.pause();
                }
            }
            KeyCode::Char('+') => {
                let period = text_box.tick_period().saturating_sub(Duration::from_millis(10));
                text_box.set_tick_period(period.max(Duration::from_millis(10)));
            }
            KeyCode::Char('-') => {
                let period = text_box.tick_period() + Duration::from_millis(10);
                text_box.set_tick_period(period.min(Duration::from_millis(500)));
            }
            KeyCode::Char('f') => {
                text_box.flush();
            }
            KeyCode::Char('c') => text_box.clear(),
            _ => {}
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
