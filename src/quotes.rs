use crate::error::QuoteError;
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, io, path::Path};
use tracing::{debug, error, info, warn};

static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

const FALLBACK_FILE: &str = "fallback_quotes.json";

/// Length bucket used both for picking quotes and for filtering the leaderboard
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Category {
    Short,
    #[default]
    Medium,
    Long,
    VeryLong,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Short,
        Category::Medium,
        Category::Long,
        Category::VeryLong,
    ];

    pub fn for_length(length: usize) -> Self {
        match length {
            0..=100 => Category::Short,
            101..=300 => Category::Medium,
            301..=600 => Category::Long,
            _ => Category::VeryLong,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.to_string() == name)
    }

    /// Character range shown next to the category in menus
    pub fn range_label(&self) -> &'static str {
        match self {
            Category::Short => "0-100 chars",
            Category::Medium => "101-300 chars",
            Category::Long => "301-600 chars",
            Category::VeryLong => "601+ chars",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub text: String,
    pub source: String,
    pub length: usize,
    pub id: u64,
}

impl Quote {
    fn placeholder() -> Self {
        let text = "No quotes available".to_string();
        Self {
            length: text.chars().count(),
            text,
            source: "System".to_string(),
            id: 0,
        }
    }
}

#[derive(Deserialize)]
struct QuoteFile {
    #[serde(default)]
    quotes: Vec<RawQuote>,
}

#[derive(Deserialize)]
struct RawQuote {
    text: String,
    source: Option<String>,
    length: Option<usize>,
    id: Option<u64>,
}

impl From<RawQuote> for Quote {
    fn from(raw: RawQuote) -> Self {
        Self {
            length: raw.length.unwrap_or_else(|| raw.text.chars().count()),
            source: raw.source.unwrap_or_else(|| "Unknown".to_string()),
            id: raw.id.unwrap_or(0),
            text: raw.text,
        }
    }
}

/// Pool of passages bucketed by length.
///
/// Built once at startup and handed to whoever needs random quotes.
#[derive(Debug, Clone, Default)]
pub struct QuoteSource {
    by_category: HashMap<Category, Vec<Quote>>,
}

impl QuoteSource {
    pub fn from_quotes(quotes: impl IntoIterator<Item = Quote>) -> Self {
        let mut by_category: HashMap<Category, Vec<Quote>> = HashMap::new();
        for quote in quotes {
            by_category
                .entry(Category::for_length(quote.length))
                .or_default()
                .push(quote);
        }
        Self { by_category }
    }

    fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        let file: QuoteFile = serde_json::from_str(data)?;
        Ok(Self::from_quotes(file.quotes.into_iter().map(Quote::from)))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, QuoteError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => QuoteError::NotFound(path.to_path_buf()),
            _ => QuoteError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::from_json(&data).map_err(|source| QuoteError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, using the bundled quotes when it is missing or unreadable
    pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(source) => {
                info!(
                    path = %path.as_ref().display(),
                    quotes = source.quote_count(None),
                    "loaded quotes"
                );
                source
            }
            Err(QuoteError::NotFound(p)) => {
                warn!(path = %p.display(), "quote file not found, using fallback quotes");
                Self::builtin()
            }
            Err(e) => {
                warn!(error = %e, "using fallback quotes");
                Self::builtin()
            }
        }
    }

    pub fn builtin() -> Self {
        let contents = ASSETS_DIR
            .get_file(FALLBACK_FILE)
            .and_then(|f| f.contents_utf8());

        match contents.map(Self::from_json) {
            Some(Ok(source)) => source,
            Some(Err(e)) => {
                error!(error = %e, "bundled quotes are malformed");
                Self::default()
            }
            None => {
                error!("bundled quotes are missing");
                Self::default()
            }
        }
    }

    fn pool(&self, category: Category) -> &[Quote] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn random_quote(&self, category: Category) -> Quote {
        self.random_quote_with(category, &mut rand::thread_rng())
    }

    /// Picks from `category`, or from `medium` when that bucket is empty
    pub fn random_quote_with<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> Quote {
        let pool = match self.pool(category) {
            [] => {
                debug!(%category, "no quotes in category, falling back to medium");
                self.pool(Category::Medium)
            }
            pool => pool,
        };

        pool.choose(rng).cloned().unwrap_or_else(Quote::placeholder)
    }

    pub fn random_quote_named(&self, name: &str) -> Quote {
        self.random_quote(Category::parse(name).unwrap_or_default())
    }

    pub fn quote_count(&self, category: Option<Category>) -> usize {
        match category {
            Some(c) => self.pool(c).len(),
            None => self.by_category.values().map(Vec::len).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn quote(text: &str) -> Quote {
        Quote {
            text: text.to_string(),
            source: "Test".to_string(),
            length: text.chars().count(),
            id: 0,
        }
    }

    #[test]
    fn test_category_buckets() {
        assert_eq!(Category::for_length(0), Category::Short);
        assert_eq!(Category::for_length(100), Category::Short);
        assert_eq!(Category::for_length(101), Category::Medium);
        assert_eq!(Category::for_length(300), Category::Medium);
        assert_eq!(Category::for_length(301), Category::Long);
        assert_eq!(Category::for_length(600), Category::Long);
        assert_eq!(Category::for_length(601), Category::VeryLong);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::VeryLong.to_string(), "very_long");
        assert_eq!(Category::parse("short"), Some(Category::Short));
        assert_eq!(Category::parse("very_long"), Some(Category::VeryLong));
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("huge"), None);
        assert_eq!(Category::default(), Category::Medium);
    }

    #[test]
    fn test_builtin_covers_every_category() {
        let source = QuoteSource::builtin();

        assert_eq!(source.quote_count(Some(Category::Short)), 3);
        assert_eq!(source.quote_count(Some(Category::Medium)), 2);
        assert_eq!(source.quote_count(Some(Category::Long)), 1);
        assert_eq!(source.quote_count(Some(Category::VeryLong)), 1);
        assert_eq!(source.quote_count(None), 7);
    }

    #[test]
    fn test_random_quote_from_category() {
        let source = QuoteSource::builtin();
        let mut rng = StdRng::seed_from_u64(7);

        for category in Category::ALL {
            let q = source.random_quote_with(category, &mut rng);
            assert_eq!(Category::for_length(q.length), category);
        }
    }

    #[test]
    fn test_empty_category_falls_back_to_medium() {
        let medium = "m".repeat(150);
        let source = QuoteSource::from_quotes([quote(&medium)]);

        let q = source.random_quote(Category::Short);
        assert_eq!(q.text, medium);
    }

    #[test]
    fn test_unknown_name_falls_back_to_medium() {
        let medium = "m".repeat(150);
        let source = QuoteSource::from_quotes([quote("tiny"), quote(&medium)]);

        assert_eq!(source.random_quote_named("").text, medium);
        assert_eq!(source.random_quote_named("gigantic").text, medium);
        assert_eq!(source.random_quote_named("short").text, "tiny");
    }

    #[test]
    fn test_empty_source_returns_placeholder() {
        let source = QuoteSource::default();
        let q = source.random_quote(Category::Long);

        assert_eq!(q.text, "No quotes available");
        assert_eq!(q.source, "System");
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"language": "english", "quotes": [{{"text": "hello there"}}, {{"text": "abc", "source": "Me", "length": 500, "id": 9}}]}}"#
        )
        .unwrap();

        let source = QuoteSource::load(file.path()).unwrap();
        let short = source.random_quote(Category::Short);
        assert_eq!(short.source, "Unknown");
        assert_eq!(short.length, 11);
        assert_eq!(short.id, 0);

        // explicit length wins over the text length
        let long = source.random_quote(Category::Long);
        assert_eq!(long.text, "abc");
        assert_eq!(long.id, 9);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = QuoteSource::load(dir.path().join("nope.json"));
        assert_matches!(result, Err(QuoteError::NotFound(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = QuoteSource::load(file.path());
        assert_matches!(result, Err(QuoteError::Parse { .. }));
    }

    #[test]
    fn test_load_or_builtin_recovers() {
        let dir = tempdir().unwrap();
        let source = QuoteSource::load_or_builtin(dir.path().join("missing.json"));
        assert_eq!(source.quote_count(None), 7);

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"quotes": "nope"}}"#).unwrap();
        let source = QuoteSource::load_or_builtin(file.path());
        assert_eq!(source.quote_count(None), 7);
    }
}
