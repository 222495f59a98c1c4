use crate::error::StoreError;
use crate::quotes::Category;
use crate::util::round_to;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Entries kept after every insert
pub const MAX_ENTRIES: usize = 50;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub wpm: f64,
    pub accuracy: f64,
    pub quote_length: Category,
    pub timestamp: String,
}

pub trait ScoreStore {
    fn load(&self) -> Result<Vec<ScoreRecord>, StoreError>;
    fn save(&mut self, scores: &[ScoreRecord]) -> Result<(), StoreError>;
}

/// CSV file with a header row, one score per line
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: impl Into<csv::Error>) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source: source.into(),
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(self.path.clone()),
            _ => StoreError::Read {
                path: self.path.clone(),
                source: e,
            },
        })?;

        csv::Reader::from_reader(file)
            .deserialize()
            .collect::<Result<Vec<ScoreRecord>, csv::Error>>()
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&mut self, scores: &[ScoreRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let mut writer = csv::Writer::from_path(&self.path).map_err(|e| self.write_error(e))?;
        for score in scores {
            writer.serialize(score).map_err(|e| self.write_error(e))?;
        }
        writer.flush().map_err(|e| self.write_error(e))
    }
}

/// Keeps scores in memory only, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub scores: Vec<ScoreRecord>,
    pub fail_writes: bool,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.scores.clone())
    }

    fn save(&mut self, scores: &[ScoreRecord]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write {
                path: PathBuf::from("<memory>"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "writes disabled").into(),
            });
        }
        self.scores = scores.to_vec();
        Ok(())
    }
}

/// Top scores sorted by wpm, highest first
pub struct Leaderboard {
    store: Box<dyn ScoreStore>,
    scores: Vec<ScoreRecord>,
}

impl std::fmt::Debug for Leaderboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Leaderboard")
            .field("scores", &self.scores)
            .finish_non_exhaustive()
    }
}

impl Leaderboard {
    /// A missing or corrupt store starts the leaderboard empty
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let scores = match store.load() {
            Ok(scores) => scores,
            Err(StoreError::NotFound(path)) => {
                debug!(path = %path.display(), "no leaderboard yet");
                vec![]
            }
            Err(e) => {
                warn!(error = %e, "ignoring unreadable leaderboard");
                vec![]
            }
        };
        Self { store, scores }
    }

    /// Records a score and persists the list.
    ///
    /// The in-memory list is updated even when persisting fails.
    pub fn add_score(
        &mut self,
        name: &str,
        wpm: f64,
        accuracy: f64,
        quote_length: Category,
    ) -> Result<(), StoreError> {
        self.scores.push(ScoreRecord {
            name: name.to_string(),
            wpm: round_to(wpm, 2),
            accuracy: round_to(accuracy, 2),
            quote_length,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        });
        self.scores.sort_by(|a, b| b.wpm.total_cmp(&a.wpm));
        self.scores.truncate(MAX_ENTRIES);

        self.store.save(&self.scores)
    }

    /// Best `limit` scores, restricted to `quote_length` when given
    pub fn top_scores(&self, limit: usize, quote_length: Option<Category>) -> Vec<&ScoreRecord> {
        self.scores
            .iter()
            .filter(|s| quote_length.map_or(true, |c| s.quote_length == c))
            .take(limit)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn record(name: &str, wpm: f64, quote_length: Category) -> ScoreRecord {
        ScoreRecord {
            name: name.to_string(),
            wpm,
            accuracy: 100.0,
            quote_length,
            timestamp: "2024-01-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_new_leaderboard_from_missing_file() {
        let dir = tempdir().unwrap();
        let store = FileScoreStore::with_path(dir.path().join("scores.csv"));

        assert_matches!(store.load(), Err(StoreError::NotFound(_)));

        let board = Leaderboard::new(Box::new(store));
        assert!(board.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_treated_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        fs::write(
            &path,
            "name,wpm,accuracy,quote_length,timestamp\nbob,fast,??,huge,never\n",
        )
        .unwrap();
        let store = FileScoreStore::with_path(&path);

        assert_matches!(store.load(), Err(StoreError::Parse { .. }));

        let board = Leaderboard::new(Box::new(store));
        assert!(board.is_empty());
    }

    #[test]
    fn test_add_score_rounds_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.csv");

        let mut board = Leaderboard::new(Box::new(FileScoreStore::with_path(&path)));
        board
            .add_score("alice", 61.23456, 97.5555, Category::Short)
            .unwrap();

        let reloaded = FileScoreStore::with_path(&path).load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].name, "alice");
        assert_eq!(reloaded[0].wpm, 61.23);
        assert_eq!(reloaded[0].accuracy, 97.56);
        assert_eq!(reloaded[0].quote_length, Category::Short);
        assert_eq!(reloaded[0].timestamp.len(), 19);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("name,wpm,accuracy,quote_length,timestamp"));
    }

    #[test]
    fn test_names_with_commas_survive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.csv");

        let mut board = Leaderboard::new(Box::new(FileScoreStore::with_path(&path)));
        board
            .add_score("Doe, Jane", 40.0, 90.0, Category::VeryLong)
            .unwrap();

        let board = Leaderboard::new(Box::new(FileScoreStore::with_path(&path)));
        let top = board.top_scores(10, None);
        assert_eq!(top[0].name, "Doe, Jane");
        assert_eq!(top[0].quote_length, Category::VeryLong);
    }

    #[test]
    fn test_scores_sorted_descending() {
        let mut board = Leaderboard::new(Box::new(MemoryScoreStore::default()));
        board.add_score("slow", 30.0, 90.0, Category::Medium).unwrap();
        board.add_score("fast", 90.0, 90.0, Category::Medium).unwrap();
        board.add_score("mid", 60.0, 90.0, Category::Medium).unwrap();

        let names: Vec<&str> = board
            .top_scores(10, None)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["fast", "mid", "slow"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new(Box::new(MemoryScoreStore::default()));
        board.add_score("first", 50.0, 90.0, Category::Short).unwrap();
        board.add_score("second", 50.0, 90.0, Category::Short).unwrap();

        let top = board.top_scores(2, None);
        assert_eq!(top[0].name, "first");
        assert_eq!(top[1].name, "second");
    }

    #[test]
    fn test_capped_at_max_entries() {
        let mut board = Leaderboard::new(Box::new(MemoryScoreStore::default()));
        for i in 0..60 {
            board
                .add_score(&format!("p{i}"), i as f64, 100.0, Category::Short)
                .unwrap();
        }

        assert_eq!(board.len(), MAX_ENTRIES);
        let top = board.top_scores(100, None);
        assert_eq!(top.len(), MAX_ENTRIES);
        assert_eq!(top[0].wpm, 59.0);
        assert_eq!(top[MAX_ENTRIES - 1].wpm, 10.0);
    }

    #[test]
    fn test_filter_before_limit() {
        let store = MemoryScoreStore {
            scores: vec![
                record("a", 100.0, Category::Short),
                record("b", 90.0, Category::Short),
                record("c", 80.0, Category::Long),
                record("d", 70.0, Category::Long),
                record("e", 60.0, Category::Long),
            ],
            fail_writes: false,
        };
        let board = Leaderboard::new(Box::new(store));

        let long: Vec<&str> = board
            .top_scores(2, Some(Category::Long))
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(long, vec!["c", "d"]);

        assert_eq!(board.top_scores(3, None).len(), 3);
        assert!(board.top_scores(5, Some(Category::VeryLong)).is_empty());
    }

    #[test]
    fn test_failed_write_still_updates_memory() {
        let store = MemoryScoreStore {
            scores: vec![],
            fail_writes: true,
        };
        let mut board = Leaderboard::new(Box::new(store));

        let result = board.add_score("zed", 42.0, 99.0, Category::Medium);

        assert_matches!(result, Err(StoreError::Write { .. }));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_unopenable_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let store = FileScoreStore::with_path(blocker.join("scores.csv"));

        let err = store.load().unwrap_err();
        assert_matches!(err, StoreError::Read { .. });
        assert!(std::error::Error::source(&err).is_some());

        let board = Leaderboard::new(Box::new(store));
        assert!(board.is_empty());
    }

    #[test]
    fn test_write_error_keeps_its_cause() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let mut board = Leaderboard::new(Box::new(FileScoreStore::with_path(
            blocker.join("scores.csv"),
        )));

        let err = board
            .add_score("amy", 50.0, 90.0, Category::Short)
            .unwrap_err();
        assert_matches!(err, StoreError::Write { .. });
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(board.len(), 1);
    }
}
