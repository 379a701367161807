//! Best runs, kept across sessions
//!
//! Runs rank by coins collected, then by distance travelled. The page keeps
//! the table in LocalStorage; the native binary keeps it in a JSON file.

use serde::{Deserialize, Serialize};

use crate::sim::state::{Outcome, RunSummary};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One recorded run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub distance: f32,
    /// Reached the finish line
    pub finished: bool,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

impl HighScoreEntry {
    fn outranks(&self, other: &HighScoreEntry) -> bool {
        (self.score, self.distance) > (other.score, other.distance)
    }
}

/// Best runs, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Record a finished run. Returns its 1-based rank, or `None` when it
    /// scored nothing or does not beat the table.
    pub fn add_run(&mut self, run: &RunSummary, timestamp: f64) -> Option<usize> {
        if run.score == 0 {
            return None;
        }
        let entry = HighScoreEntry {
            score: run.score,
            distance: run.distance,
            finished: run.outcome == Some(Outcome::Finished),
            timestamp,
        };

        // Earlier runs keep their place on ties
        let pos = self.entries.partition_point(|e| !entry.outranks(e));
        if pos >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }
}

/// Log the outcome of a storage write; true when it went through
fn report_save<E: std::fmt::Debug>(result: &std::result::Result<(), E>, entries: usize) -> bool {
    match result {
        Ok(()) => {
            log::info!("High scores saved ({} entries)", entries);
            true
        }
        Err(err) => {
            log::warn!("Could not save high scores: {err:?}");
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScores {
    const STORAGE_KEY: &'static str = "subway_runner_highscores";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Read the table from LocalStorage; anything unreadable starts fresh
    pub fn load() -> Self {
        let json = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match json.map(|json| serde_json::from_str::<HighScores>(&json)) {
            Some(Ok(scores)) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Some(Err(err)) => {
                log::warn!("Discarding unreadable high scores: {err}");
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Write the table to LocalStorage
    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high scores not saved");
            return;
        };
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not encode high scores: {err}");
                return;
            }
        };
        report_save(&storage.set_item(Self::STORAGE_KEY, &json), self.entries.len());
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScores {
    /// Read the table from a JSON file. A missing file is an empty table.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Ok(Self::default());
        }
        let scores: HighScores = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Write the table to a JSON file
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let written = std::fs::write(path, serde_json::to_string_pretty(self)?);
        report_save(&written, self.entries.len());
        written?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u32, distance: f32, outcome: Option<Outcome>) -> RunSummary {
        RunSummary {
            seed: 1,
            score,
            distance,
            ticks: 100,
            outcome,
        }
    }

    #[test]
    fn test_empty_run_is_not_recorded() {
        let mut scores = HighScores::default();
        assert_eq!(scores.add_run(&run(0, 50.0, Some(Outcome::GameOver)), 1.0), None);
        assert!(scores.entries.is_empty());
    }

    #[test]
    fn test_ranked_by_score_then_distance() {
        let mut scores = HighScores::default();
        assert_eq!(scores.add_run(&run(5, 10.0, Some(Outcome::GameOver)), 1.0), Some(1));
        assert_eq!(scores.add_run(&run(9, 30.0, Some(Outcome::Finished)), 2.0), Some(1));
        assert_eq!(scores.add_run(&run(5, 20.0, None), 3.0), Some(2));
        let order: Vec<(u32, f32)> = scores.entries.iter().map(|e| (e.score, e.distance)).collect();
        assert_eq!(order, vec![(9, 30.0), (5, 20.0), (5, 10.0)]);
        assert!(scores.entries[0].finished);
        assert!(!scores.entries[1].finished);
    }

    #[test]
    fn test_ties_keep_the_earlier_run_first() {
        let mut scores = HighScores::default();
        scores.add_run(&run(4, 8.0, None), 1.0);
        assert_eq!(scores.add_run(&run(4, 8.0, None), 2.0), Some(2));
        assert_eq!(scores.entries[0].timestamp, 1.0);
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::default();
        for score in 1..=15 {
            scores.add_run(&run(score, 1.0, Some(Outcome::GameOver)), score as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(6));
        // Not better than the last entry: rejected
        assert_eq!(scores.add_run(&run(6, 1.0, None), 99.0), None);
        assert_eq!(scores.add_run(&run(100, 1.0, None), 99.0), Some(1));
    }

    #[test]
    fn test_failed_write_is_not_reported_as_saved() {
        assert!(report_save(&Ok::<(), &str>(()), 3));
        assert!(!report_save(&Err("quota exceeded"), 3));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join(format!("subway_runner_missing_{}", std::process::id()))
            .join("scores.json");
        let mut scores = HighScores::default();
        scores.add_run(&run(3, 1.0, None), 1.0);
        assert!(matches!(scores.save_to(&path), Err(crate::Error::Io(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "subway_runner_scores_{}.json",
            std::process::id()
        ));
        let missing = HighScores::load_from(&path).unwrap();
        assert!(missing.entries.is_empty());

        let mut scores = HighScores::default();
        scores.add_run(&run(12, 40.0, Some(Outcome::Finished)), 42.0);
        scores.save_to(&path).unwrap();
        let loaded = HighScores::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, scores);
    }
}
