use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "quotype";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    /// `$HOME/.local/state/quotype`, falling back to the platform data dir
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            Self::project().map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("quotype_config.json"))
    }

    pub fn leaderboard_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("leaderboard.csv"))
            .unwrap_or_else(|| PathBuf::from("leaderboard.csv"))
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("quotype.log"))
            .unwrap_or_else(|| PathBuf::from("quotype.log"))
    }

    pub fn quotes_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_dir().join("english.json"))
            .unwrap_or_else(|| PathBuf::from("english.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert!(AppDirs::leaderboard_path().ends_with("leaderboard.csv"));
        assert!(AppDirs::log_path().ends_with("quotype.log"));
        assert!(AppDirs::config_path().ends_with("config.json"));
        assert!(AppDirs::quotes_path().ends_with("english.json"));
    }
}
