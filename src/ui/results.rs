use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Cell, Padding, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Screen};
use crate::engine::{SessionResult, WordRecord};
use crate::ui::{centered, hint_style};
use crate::util::{humanize, truncate_to_width};

/// Rows of the word history shown after a test
pub const WORD_HISTORY_ROWS: usize = 15;

const WORD_WIDTH: usize = 20;

fn result_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Cyan)),
        Span::styled(
            value,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn summary_lines(results: &SessionResult, quote_length: &str) -> Vec<Line<'static>> {
    vec![
        result_line("Words Per Minute", format!("{:.2}", results.wpm)),
        result_line("Accuracy", format!("{:.2}%", results.accuracy)),
        result_line("Total Errors", results.errors.to_string()),
        result_line("Time Taken", format!("{:.2}s", results.elapsed_secs)),
        result_line("Quote Length", humanize(quote_length)),
    ]
}

fn word_row(idx: usize, record: &WordRecord) -> Row<'static> {
    let typed = if record.typed.is_empty() {
        Cell::from(Span::styled("skipped", hint_style()))
    } else {
        Cell::from(truncate_to_width(&record.typed, WORD_WIDTH))
            .style(Style::default().fg(Color::Yellow))
    };
    let (mark, color) = if record.correct {
        ("✓", Color::Green)
    } else {
        ("✗", Color::Red)
    };

    Row::new(vec![
        Cell::from((idx + 1).to_string()).style(hint_style()),
        Cell::from(truncate_to_width(&record.word, WORD_WIDTH))
            .style(Style::default().fg(Color::Cyan)),
        typed,
        Cell::from(format!("{:.0}%", record.accuracy)),
        Cell::from(mark).style(Style::default().fg(color)),
    ])
}

/// Word history table plus the number of words left out of it
fn word_history_table(records: Vec<WordRecord>) -> (Table<'static>, usize) {
    let hidden = records.len().saturating_sub(WORD_HISTORY_ROWS);
    let rows: Vec<Row> = records
        .iter()
        .take(WORD_HISTORY_ROWS)
        .enumerate()
        .map(|(idx, record)| word_row(idx, record))
        .collect();

    let header = Row::new(vec!["#", "Target Word", "You Typed", "Accuracy", "✓/✗"]).style(
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(WORD_WIDTH as u16),
            Constraint::Length(WORD_WIDTH as u16),
            Constraint::Length(10),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(
        Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::LightBlue))
            .title(Span::styled(
                format!("Word History (Top {WORD_HISTORY_ROWS})"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    (table, hidden)
}

pub fn render_results(app: &App, f: &mut Frame, area: Rect) {
    let (Some(results), Some(session)) = (&app.results, &app.session) else {
        return;
    };
    let history: Vec<WordRecord> = session.engine.word_history().collect();
    let table_height = history.len().min(WORD_HISTORY_ROWS) as u16 + 3;

    let [summary_area, table_area, more_area, prompt_area] = Layout::vertical([
        Constraint::Length(9),
        Constraint::Length(table_height),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let summary = Paragraph::new(summary_lines(results, &app.category.to_string())).block(
        Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::LightGreen))
            .title(Span::styled(
                "Test Results",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::new(3, 3, 1, 1)),
    );
    f.render_widget(summary, centered(summary_area, 44, 9));

    let (table, hidden) = word_history_table(history);
    f.render_widget(table, table_area);

    if hidden > 0 {
        let more = Paragraph::new(format!("... and {hidden} more words"))
            .style(hint_style())
            .alignment(Alignment::Center);
        f.render_widget(more, more_area);
    }

    let prompt = match app.screen {
        Screen::EnterName => Line::from(vec![
            Span::styled("Enter your name: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}_", app.name_input),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (enter to save, esc to skip)", hint_style()),
        ]),
        _ => Line::from(vec![
            Span::styled("Save to leaderboard? (y/n)", Style::default().fg(Color::Cyan)),
            Span::styled("  any other key returns to the menu", hint_style()),
        ]),
    };
    f.render_widget(
        Paragraph::new(prompt).alignment(Alignment::Center),
        prompt_area,
    );
}
