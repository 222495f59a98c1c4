use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use quotype::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    leaderboard::{FileScoreStore, Leaderboard},
    logging,
    quotes::{Category, QuoteSource},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, KeyInput, Runner},
    ui,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::{info, warn};

/// colorful terminal typing test with quote passages and a local leaderboard
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type real quotes against the clock with live per-character feedback, then keep your best runs on a local leaderboard."
)]
pub struct Cli {
    /// quote length to start with (saved choice is used otherwise)
    #[clap(short = 'l', long, value_enum)]
    length: Option<Category>,

    /// quotes file to read instead of the default one
    #[clap(short = 'q', long)]
    quotes: Option<PathBuf>,

    /// leaderboard file to read and write
    #[clap(long)]
    leaderboard: Option<PathBuf>,

    /// number of scores shown on the leaderboard
    #[clap(long)]
    limit: Option<usize>,
}

impl Cli {
    /// Command line values win over the saved config for this run only
    fn apply(&self, mut config: Config) -> Config {
        if let Some(length) = self.length {
            config.default_length = length;
        }
        if let Some(quotes) = &self.quotes {
            config.quotes_file = Some(quotes.clone());
        }
        if let Some(leaderboard) = &self.leaderboard {
            config.leaderboard_file = Some(leaderboard.clone());
        }
        if let Some(limit) = self.limit {
            config.leaderboard_limit = limit;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = AppDirs::log_path();
    if let Err(e) = logging::init(&log_path) {
        eprintln!("warning: logging disabled ({}): {e}", log_path.display());
    }

    let config_store = FileConfigStore::new();
    let config = cli.apply(config_store.load());
    let quotes = QuoteSource::load_or_builtin(config.quotes_path());
    let leaderboard = Leaderboard::new(Box::new(FileScoreStore::with_path(
        config.leaderboard_path(),
    )));
    info!(
        quotes = quotes.quote_count(None),
        scores = leaderboard.len(),
        length = %config.default_length,
        "starting"
    );
    let mut app = App::new(quotes, leaderboard, config, Box::new(config_store));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "terminal loop failed");
    }
    info!("goodbye");
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui::draw(app, f))?;
    loop {
        match runner.step() {
            AppEvent::Tick => {
                if app.needs_tick_redraw() {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => {
                if app.handle_key(KeyInput::from(key)) == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}
