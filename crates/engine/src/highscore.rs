//! Best score persisted between runs as a small JSON document.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: f64,
}

/// The better of the stored best and a finished game's score
pub fn high_score(stored: f64, score: f64) -> f64 {
    stored.max(score)
}

/// High-score persistence; without a path the best is only kept in memory
#[derive(Debug, Clone, PartialEq)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
    best: f64,
}

impl HighScoreStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path, best: 0.0 }
    }

    pub fn in_memory() -> Self {
        Self::new(None)
    }

    /// Best score seen by this store so far
    pub fn best(&self) -> f64 {
        self.best
    }

    /// Read the stored best; a missing file counts as zero
    pub fn load(&mut self) -> Result<f64> {
        let Some(path) = &self.path else {
            return Ok(self.best);
        };
        let stored = match fs::read_to_string(path) {
            Ok(text) => {
                let file: HighScoreFile = serde_json::from_str(&text)
                    .with_context(|| format!("malformed high score file {}", path.display()))?;
                file.high_score
            }
            Err(e) if e.kind() == ErrorKind::NotFound => 0.0,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read high score {}", path.display()))
            }
        };
        self.best = high_score(self.best, stored);
        Ok(self.best)
    }

    /// Record a finished game, returning the (possibly new) best
    pub fn submit(&mut self, score: f64) -> Result<f64> {
        self.best = high_score(self.best, score);
        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(&HighScoreFile {
                high_score: self.best,
            })?;
            fs::write(path, json)
                .with_context(|| format!("failed to write high score {}", path.display()))?;
        }
        Ok(self.best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_score_is_max() {
        assert_eq!(high_score(10.0, 4.2), 10.0);
        assert_eq!(high_score(3.0, 4.2), 4.2);
    }

    #[test]
    fn test_missing_file_counts_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HighScoreStore::new(Some(dir.path().join("hs.json")));
        assert_eq!(store.load().unwrap(), 0.0);
    }

    #[test]
    fn test_submit_persists_the_best() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.json");

        let mut store = HighScoreStore::new(Some(path.clone()));
        assert_eq!(store.submit(12.6).unwrap(), 12.6);
        assert_eq!(store.submit(3.0).unwrap(), 12.6);

        let mut reopened = HighScoreStore::new(Some(path.clone()));
        assert_eq!(reopened.load().unwrap(), 12.6);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["high_score"], 12.6);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.json");
        fs::write(&path, "not json").unwrap();

        let mut store = HighScoreStore::new(Some(path));
        assert!(store.load().is_err());
        assert_eq!(store.best(), 0.0);
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = HighScoreStore::in_memory();
        assert_eq!(store.load().unwrap(), 0.0);
        store.submit(5.4).unwrap();
        assert_eq!(store.load().unwrap(), 5.4);
    }
}
