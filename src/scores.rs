//! High-score persistence.
//!
//! Scores are stored as decimal strings under fixed key names, one key per
//! game mode. Reads never fail: a missing or unparseable entry is a score
//! of zero.

use crate::utils::persistence::{load_json_file_or_default, save_json_file, save_path};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// File holding every mode's high score.
pub const SCORES_FILENAME: &str = "scores.json";

/// Key/value storage for high scores.
pub trait HighScoreStore {
    /// Raw stored value for `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Replace the stored value for `key`.
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;

    /// Remove every stored score.
    fn clear(&mut self) -> io::Result<()>;
}

/// Parse a stored score. Anything but a non-negative decimal integer is zero.
pub fn parse_score(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}

/// Read the high score for `key`, treating missing or corrupt data as zero.
pub fn load_high_score(store: &dyn HighScoreStore, key: &str) -> u64 {
    parse_score(store.read(key).as_deref())
}

/// Persist `score` if it beats `current`. Returns the resulting high score.
///
/// Write failures are logged and otherwise ignored; the returned value still
/// reflects the improvement so the session shows the new best.
pub fn record_high_score(
    store: &mut dyn HighScoreStore,
    key: &str,
    current: u64,
    score: u64,
) -> u64 {
    if score <= current {
        return current;
    }
    if let Err(e) = store.write(key, &score.to_string()) {
        log::warn!("could not persist high score {} for {}: {}", score, key, e);
    } else {
        log::info!("new high score for {}: {}", key, score);
    }
    score
}

/// Scores kept in `~/.piano-tiles/scores.json`.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    /// Open the store in the user's data directory.
    pub fn open() -> io::Result<Self> {
        Ok(Self::at(save_path(SCORES_FILENAME)?))
    }

    /// Open a store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> HashMap<String, String> {
        load_json_file_or_default(&self.path)
    }
}

impl HighScoreStore for FileScoreStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries().remove(key)
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries();
        entries.insert(key.to_string(), value.to_string());
        save_json_file(&self.path, &entries)
    }

    fn clear(&mut self) -> io::Result<()> {
        save_json_file(&self.path, &HashMap::<String, String>::new())
    }
}

/// Scores held in memory, for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one raw entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryScoreStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(Some("120")), 120);
        assert_eq!(parse_score(Some(" 7 ")), 7);
        assert_eq!(parse_score(Some("-3")), 0);
        assert_eq!(parse_score(Some("12abc")), 0);
        assert_eq!(parse_score(Some("")), 0);
        assert_eq!(parse_score(None), 0);
    }

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryScoreStore::new();
        assert_eq!(load_high_score(&store, "highScore"), 0);
    }

    #[test]
    fn test_load_corrupt_is_zero() {
        let store = MemoryScoreStore::with_entry("highScore", "NaN");
        assert_eq!(load_high_score(&store, "highScore"), 0);
    }

    #[test]
    fn test_record_only_on_improvement() {
        let mut store = MemoryScoreStore::with_entry("highScore", "50");

        assert_eq!(record_high_score(&mut store, "highScore", 50, 40), 50);
        assert_eq!(record_high_score(&mut store, "highScore", 50, 50), 50);
        assert_eq!(store.writes(), 0);

        assert_eq!(record_high_score(&mut store, "highScore", 50, 75), 75);
        assert_eq!(store.writes(), 1);
        assert_eq!(store.read("highScore").as_deref(), Some("75"));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = MemoryScoreStore::new();
        record_high_score(&mut store, "tilesHighScore", 0, 300);
        assert_eq!(load_high_score(&store, "tilesHighScore"), 300);
        assert_eq!(load_high_score(&store, "rushHighScore"), 0);
    }

    #[test]
    fn test_file_store_roundtrip_and_clear() {
        let path = std::env::temp_dir()
            .join(format!("piano-tiles-scores-{}", std::process::id()))
            .join(SCORES_FILENAME);
        let mut store = FileScoreStore::at(&path);

        assert_eq!(load_high_score(&store, "highScore"), 0);
        store.write("highScore", "90").unwrap();
        store.write("rushHighScore", "15").unwrap();

        let reopened = FileScoreStore::at(&path);
        assert_eq!(load_high_score(&reopened, "highScore"), 90);
        assert_eq!(load_high_score(&reopened, "rushHighScore"), 15);

        store.clear().unwrap();
        assert_eq!(load_high_score(&store, "highScore"), 0);

        fs::remove_file(path).ok();
    }
}
