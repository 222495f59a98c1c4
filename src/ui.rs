pub mod leaderboard;
pub mod menu;
pub mod results;
pub mod screen;
pub mod typing;

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{App, Notice};

const BANNER_HEIGHT: u16 = 3;

/// Draws whichever screen the app is on
pub fn draw(app: &App, f: &mut Frame) {
    let [banner_area, body] =
        Layout::vertical([Constraint::Length(BANNER_HEIGHT), Constraint::Min(0)])
            .areas(f.area());

    render_banner(f, banner_area);
    screen::current_screen(&app.screen).render(app, f, body);
}

fn render_banner(f: &mut Frame, area: Rect) {
    let banner = Paragraph::new("⚡ TYPING SPEED TEST ⚡")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(banner, centered(area, 40, BANNER_HEIGHT));
}

/// A `width` x `height` box in the middle of `area`, clamped to fit
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

pub(crate) fn notice_text(notice: &Notice) -> (String, Color) {
    match notice {
        Notice::Cancelled => ("Test cancelled!".to_string(), Color::Red),
        Notice::Saved(name) => (format!("✓ Score saved for {name}!"), Color::Green),
        Notice::SaveFailed(name) => (
            format!("Could not write the leaderboard, {name}'s score is kept until exit"),
            Color::Yellow,
        ),
    }
}

pub(crate) fn hint_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::DIM)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let inner = centered(area, 40, 10);
        assert_eq!(inner.width, 40);
        assert_eq!(inner.height, 10);
        assert_eq!(inner.x, 20);
        assert_eq!(inner.y, 7);
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let inner = centered(area, 40, 10);
        assert_eq!(inner.width, 20);
        assert_eq!(inner.height, 5);
    }

    #[test]
    fn test_banner_is_drawn() {
        let app = test_support::app_with("hi");
        let out = test_support::render(&app, 80, 24);
        assert!(out.contains("TYPING SPEED TEST"));
    }
}
