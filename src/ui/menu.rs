use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Paragraph},
    Frame,
};

use crate::app::App;
use crate::quotes::Category;
use crate::ui::{centered, hint_style, notice_text};
use crate::util::humanize;

const MENU_WIDTH: u16 = 56;

fn option_line(key: char, label: &str, color: Color, detail: Option<String>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{key}. "),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(label.to_string(), Style::default().fg(color)),
    ];
    if let Some(detail) = detail {
        spans.push(Span::styled(format!(" ({detail})"), hint_style()));
    }
    Line::from(spans)
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Short => Color::Green,
        Category::Medium => Color::Blue,
        Category::Long => Color::Magenta,
        Category::VeryLong => Color::Red,
    }
}

fn render_panel(f: &mut Frame, area: Rect, title: &str, border: Color, lines: Vec<Line>) {
    let height = lines.len() as u16 + 4;
    let [panel_area, hint_area] =
        Layout::vertical([Constraint::Length(height), Constraint::Length(1)])
            .areas(centered(area, MENU_WIDTH, height + 1));

    let panel = Paragraph::new(lines).block(
        Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                title.to_string(),
                Style::default().fg(border).add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::new(2, 2, 1, 1)),
    );
    f.render_widget(panel, panel_area);

    let hint = Paragraph::new("Press 1-4 to select")
        .style(hint_style())
        .alignment(Alignment::Center);
    f.render_widget(hint, hint_area);
}

pub fn render_menu(app: &App, f: &mut Frame, area: Rect) {
    let lines = vec![
        option_line('1', "Start Typing Test", Color::Green, None),
        option_line('2', "View Leaderboard", Color::Magenta, None),
        option_line(
            '3',
            "Change Quote Length",
            Color::Blue,
            Some(format!("Current: {}", app.category)),
        ),
        option_line('4', "Exit", Color::Red, None),
    ];
    render_panel(f, area, "Menu", Color::LightBlue, lines);

    if let Some(notice) = &app.notice {
        let (text, color) = notice_text(notice);
        let [_, notice_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let notice = Paragraph::new(text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(notice, notice_area);
    }
}

pub fn render_select_length(app: &App, f: &mut Frame, area: Rect) {
    let lines = Category::ALL
        .iter()
        .zip('1'..='4')
        .map(|(&category, key)| {
            let label = humanize(&category.to_string());
            let detail = if category == app.category {
                format!("{}, current", category.range_label())
            } else {
                category.range_label().to_string()
            };
            option_line(key, &label, category_color(category), Some(detail))
        })
        .collect();
    render_panel(f, area, "Select Quote Length", Color::LightGreen, lines);
}
