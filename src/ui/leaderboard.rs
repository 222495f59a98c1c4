use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Cell, Padding, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::leaderboard::ScoreRecord;
use crate::quotes::Category;
use crate::ui::{centered, hint_style};
use crate::util::{humanize, truncate_to_width};

const NAME_WIDTH: usize = 15;
const TIMESTAMP_WIDTH: u16 = 19;

const FILTERS: [(char, &str); 5] = [
    ('1', "All"),
    ('2', "Short"),
    ('3', "Medium"),
    ('4', "Long"),
    ('5', "Very Long"),
];

fn rank_label(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => n.to_string(),
    }
}

fn filter_title(filter: Option<Category>) -> String {
    let label = filter.map_or_else(|| "All".to_string(), |c| humanize(&c.to_string()));
    format!("Top Scores ({label})")
}

pub fn render_filter(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = FILTERS
        .iter()
        .map(|&(key, label)| {
            Line::from(vec![
                Span::styled(
                    format!("{key}. "),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(label),
            ])
        })
        .collect();
    let height = lines.len() as u16 + 4;

    let [panel_area, hint_area] =
        Layout::vertical([Constraint::Length(height), Constraint::Length(1)])
            .areas(centered(area, 40, height + 1));

    let panel = Paragraph::new(lines).block(
        Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::LightMagenta))
            .title(Span::styled(
                "Filter Leaderboard",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::new(2, 2, 1, 1)),
    );
    f.render_widget(panel, panel_area);

    let hint = Paragraph::new("Press 1-5 to filter")
        .style(hint_style())
        .alignment(Alignment::Center);
    f.render_widget(hint, hint_area);
}

fn score_row(rank: usize, score: &ScoreRecord) -> Row<'static> {
    Row::new(vec![
        Cell::from(rank_label(rank)).style(Style::default().fg(Color::Yellow)),
        Cell::from(truncate_to_width(&score.name, NAME_WIDTH))
            .style(Style::default().fg(Color::Magenta)),
        Cell::from(format!("{:.1}", score.wpm)).style(Style::default().fg(Color::Green)),
        Cell::from(format!("{:.1}%", score.accuracy)).style(Style::default().fg(Color::Blue)),
        Cell::from(humanize(&score.quote_length.to_string())),
        Cell::from(score.timestamp.clone()).style(hint_style()),
    ])
}

pub fn render_leaderboard(app: &App, filter: Option<Category>, f: &mut Frame, area: Rect) {
    let scores = app.top_scores(filter);

    let [table_area, hint_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let block = Block::bordered()
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            filter_title(filter),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    if scores.is_empty() {
        let empty = Paragraph::new("No scores yet! Be the first to set a record!")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(block.padding(Padding::vertical(1)));
        f.render_widget(empty, centered(table_area, 60, 5));
    } else {
        let rows: Vec<Row> = scores
            .iter()
            .enumerate()
            .map(|(idx, score)| score_row(idx + 1, score))
            .collect();
        let header = Row::new(vec!["Rank", "Name", "WPM", "Accuracy", "Length", "Date"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Length(NAME_WIDTH as u16 + 1),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(11),
                Constraint::Length(TIMESTAMP_WIDTH),
            ],
        )
        .header(header)
        .block(block);
        f.render_widget(table, table_area);
    }

    let hint = Paragraph::new("Press any key to return to the menu")
        .style(hint_style())
        .alignment(Alignment::Center);
    f.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use crate::runtime::KeyInput;
    use crate::ui::test_support::{app_with, render};

    #[test]
    fn test_filter_menu() {
        let mut app = app_with("hi");
        app.handle_key(KeyInput::Char('2'));
        assert_eq!(app.screen, Screen::LeaderboardFilter);

        let out = render(&app, 80, 24);
        assert!(out.contains("Filter Leaderboard"));
        assert!(out.contains("1. All"));
        assert!(out.contains("5. Very Long"));
    }

    #[test]
    fn test_empty_leaderboard() {
        let mut app = app_with("hi");
        app.screen = Screen::Leaderboard(None);

        let out = render(&app, 80, 24);
        assert!(out.contains("Top Scores (All)"));
        assert!(out.contains("No scores yet! Be the first to set a record!"));
    }

    #[test]
    fn test_scores_are_ranked_and_filtered() {
        let mut app = app_with("hi");
        app.leaderboard
            .add_score("alice", 80.0, 97.5, Category::Short)
            .unwrap();
        app.leaderboard
            .add_score("bob", 60.0, 91.0, Category::Long)
            .unwrap();
        app.leaderboard
            .add_score("a-very-long-player-name", 70.0, 99.0, Category::Short)
            .unwrap();

        app.screen = Screen::Leaderboard(Some(Category::Short));
        let out = render(&app, 80, 24);
        assert!(out.contains("Top Scores (Short)"));
        assert!(out.contains("alice"));
        assert!(out.contains("80.0"));
        assert!(out.contains("97.5%"));
        assert!(out.contains("a-very-long-pla"));
        assert!(!out.contains("a-very-long-play"));
        assert!(!out.contains("bob"));

        app.screen = Screen::Leaderboard(None);
        let out = render(&app, 80, 24);
        assert!(out.contains("bob"));
        assert!(out.contains("Long"));
    }

    #[test]
    fn test_full_timestamp_is_shown() {
        let mut app = app_with("hi");
        app.leaderboard
            .add_score("cleo", 55.0, 95.0, Category::Medium)
            .unwrap();
        let timestamp = app.top_scores(None)[0].timestamp.clone();
        assert_eq!(timestamp.len(), 19);

        app.screen = Screen::Leaderboard(None);
        let out = render(&app, 80, 24);
        assert!(out.contains(&timestamp));
    }

    #[test]
    fn test_rank_labels() {
        assert_eq!(rank_label(1), "🥇");
        assert_eq!(rank_label(3), "🥉");
        assert_eq!(rank_label(4), "4");
    }

    #[test]
    fn test_filter_title() {
        assert_eq!(filter_title(None), "Top Scores (All)");
        assert_eq!(filter_title(Some(Category::VeryLong)), "Top Scores (Very long)");
    }
}
