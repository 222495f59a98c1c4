use crate::util::round_to;
use itertools::{EitherOrBoth, Itertools};
use std::time::SystemTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
    Pending,
}

/// One target word compared against what the user typed in the same slot
#[derive(Clone, Debug, PartialEq)]
pub struct WordRecord {
    pub word: String,
    pub typed: String,
    pub accuracy: f64,
    pub correct: bool,
}

impl WordRecord {
    fn compare(word: &str, typed: String) -> Self {
        let word_len = word.chars().count();
        let matching = word
            .chars()
            .zip(typed.chars())
            .filter(|(expected, actual)| expected == actual)
            .count();
        let accuracy = if word_len == 0 {
            0.0
        } else {
            round_to(matching as f64 / word_len as f64 * 100.0, 1)
        };

        Self {
            correct: word == typed,
            word: word.to_string(),
            typed,
            accuracy,
        }
    }

    fn skipped(word: &str) -> Self {
        Self {
            word: word.to_string(),
            typed: String::new(),
            accuracy: 0.0,
            correct: false,
        }
    }
}

/// Final stats of a session, as shown on the results screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionResult {
    pub wpm: f64,
    pub accuracy: f64,
    pub errors: usize,
    pub elapsed_secs: f64,
}

/// A single attempt at typing one passage.
///
/// The engine never fails: every degenerate state (no input, timer not
/// started, clock going backwards) resolves to a zero value. Callers own
/// the timer discipline, `start` and `end` simply overwrite the previous
/// timestamp.
#[derive(Debug, Clone)]
pub struct TypingEngine {
    prompt: String,
    target: Vec<char>,
    input: Vec<char>,
    started_at: Option<SystemTime>,
    ended_at: Option<SystemTime>,
}

impl TypingEngine {
    pub fn new(prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        Self {
            target: prompt.chars().collect(),
            prompt,
            input: vec![],
            started_at: None,
            ended_at: None,
        }
    }

    pub fn start(&mut self) {
        self.start_at(SystemTime::now());
    }

    pub fn start_at(&mut self, at: SystemTime) {
        self.started_at = Some(at);
    }

    pub fn end(&mut self) {
        self.end_at(SystemTime::now());
    }

    pub fn end_at(&mut self, at: SystemTime) {
        self.ended_at = Some(at);
    }

    /// Appends `c` unless the whole passage has already been typed
    pub fn add_character(&mut self, c: char) {
        if self.input.len() < self.target.len() {
            self.input.push(c);
        }
    }

    pub fn remove_character(&mut self) {
        self.input.pop();
    }

    pub fn is_complete(&self) -> bool {
        self.input.len() >= self.target.len()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_ended(&self) -> bool {
        self.ended_at.is_some()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn input(&self) -> String {
        self.input.iter().collect()
    }

    pub fn cursor_pos(&self) -> usize {
        self.input.len()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    /// Share of the passage typed so far, in percent
    pub fn progress(&self) -> f64 {
        if self.target.is_empty() {
            return 0.0;
        }
        self.input.len() as f64 / self.target.len() as f64 * 100.0
    }

    /// Status of every target character against the current input
    pub fn char_status(&self) -> Vec<(char, CharStatus)> {
        self.target
            .iter()
            .enumerate()
            .map(|(idx, &expected)| {
                let status = match self.input.get(idx) {
                    Some(&typed) if typed == expected => CharStatus::Correct,
                    Some(_) => CharStatus::Incorrect,
                    None => CharStatus::Pending,
                };
                (expected, status)
            })
            .collect()
    }

    fn correct_count(&self) -> usize {
        self.input
            .iter()
            .zip(&self.target)
            .filter(|(typed, expected)| typed == expected)
            .count()
    }

    pub fn accuracy(&self) -> f64 {
        if self.input.is_empty() {
            return 0.0;
        }
        self.correct_count() as f64 / self.input.len() as f64 * 100.0
    }

    pub fn error_count(&self) -> usize {
        self.input
            .iter()
            .zip(&self.target)
            .filter(|(typed, expected)| typed != expected)
            .count()
    }

    fn words_typed(&self) -> usize {
        self.input().split_whitespace().count()
    }

    fn wpm_between(&self, from: SystemTime, to: SystemTime) -> f64 {
        let elapsed_secs = match to.duration_since(from) {
            Ok(d) => d.as_secs_f64(),
            Err(_) => return 0.0,
        };
        if elapsed_secs == 0.0 {
            return 0.0;
        }

        let minutes = elapsed_secs / 60.0;
        if minutes > 0.0 {
            self.words_typed() as f64 / minutes
        } else {
            0.0
        }
    }

    /// Words per minute between `start` and `end`; zero until both are set
    pub fn wpm(&self) -> f64 {
        match (self.started_at, self.ended_at) {
            (Some(from), Some(to)) => self.wpm_between(from, to),
            _ => 0.0,
        }
    }

    pub fn live_wpm(&self) -> f64 {
        self.live_wpm_at(SystemTime::now())
    }

    pub fn live_wpm_at(&self, now: SystemTime) -> f64 {
        match self.started_at {
            Some(from) => self.wpm_between(from, now),
            None => 0.0,
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs_at(SystemTime::now())
    }

    pub fn elapsed_secs_at(&self, now: SystemTime) -> f64 {
        let Some(from) = self.started_at else {
            return 0.0;
        };
        let to = self.ended_at.unwrap_or(now);
        to.duration_since(from)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Per-word comparison of the passage against the input.
    ///
    /// Both sides are split on runs of whitespace and compared slot by slot,
    /// so an extra or missing space shifts every following word. Typed words
    /// past the end of the passage are ignored. The iterator is recomputed
    /// from the current input on every call.
    pub fn word_history(&self) -> impl Iterator<Item = WordRecord> + '_ {
        let typed_words: Vec<String> = self
            .input()
            .split_whitespace()
            .map(str::to_owned)
            .collect();

        self.prompt
            .split_whitespace()
            .zip_longest(typed_words)
            .filter_map(|pair| match pair {
                EitherOrBoth::Both(word, typed) => Some(WordRecord::compare(word, typed)),
                EitherOrBoth::Left(word) => Some(WordRecord::skipped(word)),
                EitherOrBoth::Right(_) => None,
            })
    }

    pub fn results(&self) -> SessionResult {
        SessionResult {
            wpm: self.wpm(),
            accuracy: self.accuracy(),
            errors: self.error_count(),
            elapsed_secs: self.elapsed_secs(),
        }
    }
}
