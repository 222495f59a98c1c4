use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::engine::{CharStatus, TypingEngine};
use crate::ui::hint_style;

const HORIZONTAL_MARGIN: u16 = 2;

fn prompt_spans(engine: &TypingEngine) -> Vec<Span<'static>> {
    let cursor = engine.cursor_pos();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    engine
        .char_status()
        .into_iter()
        .enumerate()
        .map(|(idx, (c, status))| {
            let style = if idx == cursor {
                bold.fg(Color::Black).bg(Color::Yellow)
            } else {
                match status {
                    CharStatus::Correct => bold.fg(Color::Green),
                    CharStatus::Incorrect => bold.fg(Color::White).bg(Color::Red),
                    CharStatus::Pending => Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                }
            };
            Span::styled(c.to_string(), style)
        })
        .collect()
}

fn stat(label: &str, value: String, color: Color) -> [Span<'static>; 2] {
    [
        Span::styled(format!("{label}: "), Style::default().fg(color).add_modifier(Modifier::DIM)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]
}

/// The live stats line: WPM, accuracy, time and progress
pub fn stats_line(engine: &TypingEngine) -> Line<'static> {
    let separator = Span::styled("  │  ", hint_style());
    let mut spans = Vec::with_capacity(11);
    spans.extend(stat("WPM", format!("{:.1}", engine.live_wpm()), Color::Cyan));
    spans.push(separator.clone());
    spans.extend(stat("Accuracy", format!("{:.1}%", engine.accuracy()), Color::Yellow));
    spans.push(separator.clone());
    spans.extend(stat("Time", format!("{:.1}s", engine.elapsed_secs()), Color::Green));
    spans.push(separator);
    spans.extend(stat("Progress", format!("{:.0}%", engine.progress()), Color::Magenta));
    Line::from(spans)
}

pub fn render_typing(app: &App, f: &mut Frame, area: Rect) {
    let Some(session) = &app.session else {
        return;
    };
    let engine = &session.engine;

    let [text_area, stats_area, hint_area] = Layout::vertical([
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .horizontal_margin(HORIZONTAL_MARGIN)
    .areas(area);

    let title = Line::from(vec![
        Span::styled(
            "Type the text below",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  ", hint_style()),
        Span::styled(
            session.quote.source.clone(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        ),
    ]);

    let prompt = Paragraph::new(Line::from(prompt_spans(engine)))
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::LightBlue))
                .title(title)
                .padding(Padding::new(2, 2, 1, 1)),
        );
    f.render_widget(prompt, text_area);

    let stats = Paragraph::new(stats_line(engine))
        .alignment(Alignment::Center)
        .block(Block::bordered().border_style(Style::default().fg(Color::LightGreen)));
    f.render_widget(stats, stats_area);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Tip: Press ", hint_style()),
        Span::styled(
            "TAB",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to skip this quote and get a new one, ", hint_style()),
        Span::styled(
            "ESC",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to cancel", hint_style()),
    ]))
    .alignment(Alignment::Center)
    .block(Block::bordered().border_style(hint_style()));
    f.render_widget(hint, hint_area);
}
