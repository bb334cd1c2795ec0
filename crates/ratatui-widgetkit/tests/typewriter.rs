use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui_widgetkit::AttributeError;
use ratatui_widgetkit::TextBox;
use ratatui_widgetkit::TextBoxOptions;
use ratatui_widgetkit::Theme;
use ratatui_widgetkit::ThemeSlot;
use ratatui_widgetkit::textbox::Reveal;

fn plain_rows(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.y..area.y + area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

#[test]
fn streamed_text_reveals_and_scrolls_inside_a_terminal_frame() {
    let window = Theme::new()
        .with(ThemeSlot::TextBox, Style::default().fg(Color::White))
        .unwrap();
    let mut widget_theme = window.snapshot();
    widget_theme
        .set(ThemeSlot::TextBox, Style::default().fg(Color::Green))
        .unwrap();

    let mut tb = TextBox::with_options(TextBoxOptions::sized(12, 2).themed(&widget_theme));
    tb.append("The quick brown fox jumps over the lazy dog.");

    let mut terminal = Terminal::new(TestBackend::new(14, 4)).unwrap();
    let area = Rect::new(1, 1, 12, 2);

    // half way: nothing has scrolled yet
    for _ in 0..16 {
        tb.tick();
    }
    terminal
        .draw(|f| tb.render_ref(area, f.buffer_mut()))
        .unwrap();
    assert_eq!(
        plain_rows(terminal.backend().buffer()),
        ["", " The quick", " brown", ""]
    );

    let mut scrolled = 0;
    while let Some(reveal) = tb.tick() {
        if reveal == Reveal::Scrolled {
            scrolled += 1;
        }
    }
    assert_eq!(scrolled, 3);
    terminal
        .draw(|f| tb.render_ref(area, f.buffer_mut()))
        .unwrap();
    assert_eq!(
        plain_rows(terminal.backend().buffer()),
        ["", " the lazy", " dog.", ""]
    );
    assert_eq!(
        terminal.backend().buffer().cell((1, 1)).unwrap().fg,
        Color::Green
    );
}

#[test]
fn typo_in_a_theme_override_is_rejected_by_the_store() {
    let theme = Theme::new();
    let mut attrs = theme.attributes().clone();
    assert_eq!(attrs.len(), ThemeSlot::ALL.len());

    let other = ratatui_widgetkit::attributes::AttributeStore::new([("accent", 1u8)]).unwrap();
    let mut layered =
        ratatui_widgetkit::attributes::LayeredAttributeStore::new(std::sync::Arc::new(other));
    let err = layered.set_override("acent", 2).unwrap_err();
    assert!(matches!(err, AttributeError::KeyNotFound { .. }));

    attrs
        .set_override(ThemeSlot::Accent, Style::default().fg(Color::Red))
        .unwrap();
    assert_eq!(attrs.override_count(), 1);
    assert!(!theme.is_overridden(ThemeSlot::Accent));

    attrs.clear_all_overrides();
    assert_eq!(attrs.override_count(), 0);
    assert_eq!(
        attrs.get(&ThemeSlot::Accent).copied().unwrap(),
        theme.style(ThemeSlot::Accent)
    );
}
