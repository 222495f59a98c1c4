// Library surface for headless/integration tests and reuse.
// The binary in main.rs only owns the terminal and the CLI.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod error;
pub mod leaderboard;
pub mod logging;
pub mod quotes;
pub mod runtime;
pub mod ui;
pub mod util;
