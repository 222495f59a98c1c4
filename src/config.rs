use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use crate::quotes::Category;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub default_length: Category,
    pub quotes_file: Option<PathBuf>,
    pub leaderboard_file: Option<PathBuf>,
    pub leaderboard_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_length: Category::Medium,
            quotes_file: None,
            leaderboard_file: None,
            leaderboard_limit: 15,
        }
    }
}

impl Config {
    pub fn quotes_path(&self) -> PathBuf {
        self.quotes_file.clone().unwrap_or_else(AppDirs::quotes_path)
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.leaderboard_file
            .clone()
            .unwrap_or_else(AppDirs::leaderboard_path)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data).map_err(write_err)
    }
}

/// Config store that never touches disk
#[derive(Debug, Clone, Default)]
pub struct NullConfigStore;

impl ConfigStore for NullConfigStore {
    fn load(&self) -> Config {
        Config::default()
    }

    fn save(&self, _cfg: &Config) -> Result<(), ConfigError> {
        Ok(())
    }
}
