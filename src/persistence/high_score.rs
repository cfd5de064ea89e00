use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Key-value slot holding the best score across sessions
pub trait HighScoreStore {
    /// Read the stored score; a store with nothing saved yet returns 0
    fn load(&self) -> Result<u32>;

    /// Overwrite the stored score
    fn save(&mut self, score: u32) -> Result<()>;
}

/// On-disk representation of the high score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,

    /// Version of the game that wrote the record
    #[serde(default)]
    pub version: String,
}

impl HighScoreRecord {
    pub fn new(high_score: u32) -> Self {
        Self {
            high_score,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse high score file {:?}", self.path))?;

        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord::new(score))
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// In-memory store, for tests and runs that should not touch the disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<u32>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            score: Some(score),
            saves: 0,
        }
    }

    pub fn score(&self) -> Option<u32> {
        self.score
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32> {
        Ok(self.score.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.score = Some(score);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("high_score.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("high_score.json");

        let mut store = JsonFileStore::new(&path);
        store.save(120).unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap(), 120);

        // Last write wins
        store.save(90).unwrap();
        assert_eq!(JsonFileStore::new(&path).load().unwrap(), 90);
    }

    #[test]
    fn test_record_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("high_score.json");
        JsonFileStore::new(&path).save(70).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let record: HighScoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, HighScoreRecord::new(70));
    }

    #[test]
    fn test_record_without_version() {
        let record: HighScoreRecord = serde_json::from_str(r#"{"high_score": 30}"#).unwrap();
        assert_eq!(record.high_score, 30);
        assert!(record.version.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("high_score.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(JsonFileStore::new(&path).load().is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), 0);
        store.save(40).unwrap();
        assert_eq!(store.load().unwrap(), 40);
        assert_eq!(store.saves(), 1);
        assert_eq!(MemoryStore::with_score(15).load().unwrap(), 15);
    }
}
