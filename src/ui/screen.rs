use ratatui::{layout::Rect, Frame};

use crate::app::{App, Screen};
use crate::ui::{leaderboard, menu, results, typing};

/// A UI screen boundary: renders one app state into the body area
pub trait View {
    fn render(&self, app: &App, f: &mut Frame, area: Rect);
}

pub struct MenuView;

impl View for MenuView {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        menu::render_menu(app, f, area);
    }
}

pub struct SelectLengthView;

impl View for SelectLengthView {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        menu::render_select_length(app, f, area);
    }
}

pub struct TypingView;

impl View for TypingView {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        typing::render_typing(app, f, area);
    }
}

pub struct ResultsView;

impl View for ResultsView {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        results::render_results(app, f, area);
    }
}

pub struct FilterView;

impl View for FilterView {
    fn render(&self, _app: &App, f: &mut Frame, area: Rect) {
        leaderboard::render_filter(f, area);
    }
}

pub struct LeaderboardView;

impl View for LeaderboardView {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        if let Screen::Leaderboard(filter) = app.screen {
            leaderboard::render_leaderboard(app, filter, f, area);
        }
    }
}

/// Helper to construct the appropriate view for the current screen
pub fn current_screen(screen: &Screen) -> Box<dyn View> {
    match screen {
        Screen::Menu => Box::new(MenuView),
        Screen::SelectLength => Box::new(SelectLengthView),
        Screen::Typing => Box::new(TypingView),
        Screen::Results | Screen::EnterName => Box::new(ResultsView),
        Screen::LeaderboardFilter => Box::new(FilterView),
        Screen::Leaderboard(_) => Box::new(LeaderboardView),
    }
}
