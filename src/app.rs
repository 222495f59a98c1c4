use crate::config::{Config, ConfigStore};
use crate::engine::{SessionResult, TypingEngine};
use crate::leaderboard::Leaderboard;
use crate::quotes::{Category, Quote, QuoteSource};
use crate::runtime::KeyInput;
use tracing::{debug, info, warn};

/// Longest name accepted for the leaderboard
pub const MAX_NAME_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu,
    SelectLength,
    Typing,
    Results,
    EnterName,
    LeaderboardFilter,
    Leaderboard(Option<Category>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Cancelled,
    Saved(String),
    SaveFailed(String),
}

/// The quote being typed and the engine scoring it
#[derive(Debug, Clone)]
pub struct Session {
    pub quote: Quote,
    pub engine: TypingEngine,
}

pub struct App {
    pub screen: Screen,
    pub category: Category,
    pub config: Config,
    pub quotes: QuoteSource,
    pub leaderboard: Leaderboard,
    pub session: Option<Session>,
    pub results: Option<SessionResult>,
    pub name_input: String,
    pub notice: Option<Notice>,
    config_store: Box<dyn ConfigStore>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("category", &self.category)
            .field("session", &self.session)
            .field("results", &self.results)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(
        quotes: QuoteSource,
        leaderboard: Leaderboard,
        config: Config,
        config_store: Box<dyn ConfigStore>,
    ) -> Self {
        Self {
            screen: Screen::Menu,
            category: config.default_length,
            config,
            quotes,
            leaderboard,
            session: None,
            results: None,
            name_input: String::new(),
            notice: None,
            config_store,
        }
    }

    pub fn engine(&self) -> Option<&TypingEngine> {
        self.session.as_ref().map(|s| &s.engine)
    }

    /// Only a running test changes between key presses
    pub fn needs_tick_redraw(&self) -> bool {
        self.screen == Screen::Typing && self.engine().is_some_and(TypingEngine::has_started)
    }

    pub fn handle_key(&mut self, input: KeyInput) -> Flow {
        if input == KeyInput::Ignored {
            return Flow::Continue;
        }

        match self.screen {
            Screen::Menu => self.on_menu_key(input),
            Screen::SelectLength => self.on_select_length_key(input),
            Screen::Typing => self.on_typing_key(input),
            Screen::Results => self.on_results_key(input),
            Screen::EnterName => self.on_name_key(input),
            Screen::LeaderboardFilter => self.on_filter_key(input),
            Screen::Leaderboard(_) => match input {
                KeyInput::Interrupt => Flow::Quit,
                _ => self.go_to(Screen::Menu),
            },
        }
    }

    fn go_to(&mut self, screen: Screen) -> Flow {
        self.screen = screen;
        Flow::Continue
    }

    fn on_menu_key(&mut self, input: KeyInput) -> Flow {
        self.notice = None;
        match input {
            KeyInput::Char('1') => {
                self.new_session();
                self.go_to(Screen::Typing)
            }
            KeyInput::Char('2') => self.go_to(Screen::LeaderboardFilter),
            KeyInput::Char('3') => self.go_to(Screen::SelectLength),
            KeyInput::Char('4' | 'q') | KeyInput::Escape | KeyInput::Interrupt => Flow::Quit,
            _ => Flow::Continue,
        }
    }

    fn on_select_length_key(&mut self, input: KeyInput) -> Flow {
        let category = match input {
            KeyInput::Char('1') => Category::Short,
            KeyInput::Char('2') => Category::Medium,
            KeyInput::Char('3') => Category::Long,
            KeyInput::Char('4') => Category::VeryLong,
            KeyInput::Escape => return self.go_to(Screen::Menu),
            KeyInput::Interrupt => return Flow::Quit,
            _ => return Flow::Continue,
        };
        self.set_category(category);
        self.go_to(Screen::Menu)
    }

    fn on_typing_key(&mut self, input: KeyInput) -> Flow {
        let Some(session) = self.session.as_mut() else {
            return self.go_to(Screen::Menu);
        };

        match input {
            KeyInput::Char(c) => {
                if !session.engine.has_started() {
                    session.engine.start();
                }
                session.engine.add_character(c);
                if session.engine.is_complete() {
                    self.finish_session();
                }
            }
            KeyInput::Backspace => session.engine.remove_character(),
            KeyInput::Skip => {
                debug!(id = session.quote.id, "quote skipped");
                self.new_session();
            }
            KeyInput::Escape | KeyInput::Interrupt => {
                info!("test cancelled");
                self.session = None;
                self.notice = Some(Notice::Cancelled);
                self.screen = Screen::Menu;
            }
            KeyInput::Enter | KeyInput::Ignored => {}
        }
        Flow::Continue
    }

    fn on_results_key(&mut self, input: KeyInput) -> Flow {
        match input {
            KeyInput::Char('y' | 'Y') => {
                self.name_input.clear();
                self.go_to(Screen::EnterName)
            }
            KeyInput::Interrupt => Flow::Quit,
            _ => self.go_to(Screen::Menu),
        }
    }

    fn on_name_key(&mut self, input: KeyInput) -> Flow {
        match input {
            KeyInput::Char(c) => {
                if self.name_input.chars().count() < MAX_NAME_LEN {
                    self.name_input.push(c);
                }
            }
            KeyInput::Backspace => {
                self.name_input.pop();
            }
            KeyInput::Enter => {
                self.save_score();
                self.screen = Screen::Menu;
            }
            KeyInput::Escape => self.screen = Screen::Menu,
            KeyInput::Interrupt => return Flow::Quit,
            KeyInput::Skip | KeyInput::Ignored => {}
        }
        Flow::Continue
    }

    fn on_filter_key(&mut self, input: KeyInput) -> Flow {
        let filter = match input {
            KeyInput::Char('2') => Some(Category::Short),
            KeyInput::Char('3') => Some(Category::Medium),
            KeyInput::Char('4') => Some(Category::Long),
            KeyInput::Char('5') => Some(Category::VeryLong),
            KeyInput::Escape => return self.go_to(Screen::Menu),
            KeyInput::Interrupt => return Flow::Quit,
            _ => None,
        };
        self.go_to(Screen::Leaderboard(filter))
    }

    /// Replaces the current session with a fresh quote of the selected length
    pub fn new_session(&mut self) {
        let quote = self.quotes.random_quote(self.category);
        debug!(id = quote.id, source = %quote.source, length = quote.length, "new quote");
        self.session = Some(Session {
            engine: TypingEngine::new(quote.text.clone()),
            quote,
        });
        self.results = None;
    }

    fn finish_session(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.engine.end();
        let results = session.engine.results();
        info!(
            wpm = results.wpm,
            accuracy = results.accuracy,
            errors = results.errors,
            category = %self.category,
            "test finished"
        );
        self.results = Some(results);
        self.screen = Screen::Results;
    }

    fn save_score(&mut self) {
        let name = self.name_input.trim().to_string();
        let Some(results) = self.results else {
            return;
        };
        if name.is_empty() {
            return;
        }

        match self
            .leaderboard
            .add_score(&name, results.wpm, results.accuracy, self.category)
        {
            Ok(()) => {
                info!(%name, wpm = results.wpm, "score saved");
                self.notice = Some(Notice::Saved(name));
            }
            Err(e) => {
                warn!(error = %e, "score kept for this run only");
                self.notice = Some(Notice::SaveFailed(name));
            }
        }
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.config.default_length = category;

        // only the length goes back to disk, command line overrides stay per run
        let mut stored = self.config_store.load();
        stored.default_length = category;
        if let Err(e) = self.config_store.save(&stored) {
            warn!(error = %e, "could not remember quote length");
        }
    }

    pub fn top_scores(&self, filter: Option<Category>) -> Vec<&crate::leaderboard::ScoreRecord> {
        self.leaderboard
            .top_scores(self.config.leaderboard_limit, filter)
    }
}
