use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const APP_DIR_NAME: &str = "snake-arcade";
const SCORE_FILE_NAME: &str = "highscores.json";

/// Number of entries kept in the table.
pub const MAX_HIGH_SCORES: usize = 10;

/// Errors raised while reading or writing the score file.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("cannot access score file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score file {} is malformed: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One finished run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub level: u32,
    /// Unix timestamp (seconds) when the run ended.
    pub recorded_at: u64,
}

impl HighScoreEntry {
    /// Local date and time the run ended, formatted for the score table.
    #[must_use]
    pub fn recorded_date(&self) -> String {
        format_timestamp(self.recorded_at)
    }
}

/// Best runs, sorted by descending score.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Adds a finished run and trims the table to [`MAX_HIGH_SCORES`].
    ///
    /// Returns the 1-based rank the run reached, or `None` if it fell off the
    /// table. Ties keep the older run first.
    pub fn record(&mut self, score: u32, level: u32, recorded_at: u64) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len());

        if rank >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(
            rank,
            HighScoreEntry {
                score,
                level,
                recorded_at,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank + 1)
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Best score on record, zero when empty.
    #[must_use]
    pub fn top_score(&self) -> u32 {
        self.entries.first().map_or(0, |entry| entry.score)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Loads the high-score table from disk.
///
/// A missing file is a first run and yields an empty table.
pub fn load_high_scores() -> Result<HighScores, ScoreError> {
    load_high_scores_from_path(&scores_path())
}

/// Saves the high-score table, creating parent directories when needed.
pub fn save_high_scores(scores: &HighScores) -> Result<(), ScoreError> {
    save_high_scores_to_path(&scores_path(), scores)
}

/// Seconds since the Unix epoch, zero if the clock is before it.
#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

fn format_timestamp(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .map_or_else(
            || String::from("-"),
            |utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        )
}

fn load_high_scores_from_path(path: &Path) -> Result<HighScores, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no score file yet");
            return Ok(HighScores::default());
        }
        Err(source) => {
            return Err(ScoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut scores =
        serde_json::from_str::<HighScores>(&raw).map_err(|source| ScoreError::Format {
            path: path.to_path_buf(),
            source,
        })?;
    scores.normalize();
    Ok(scores)
}

fn save_high_scores_to_path(path: &Path, scores: &HighScores) -> Result<(), ScoreError> {
    let io_error = |source: io::Error| ScoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(scores).map_err(|source| ScoreError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        HighScoreEntry, HighScores, MAX_HIGH_SCORES, ScoreError, format_timestamp,
        load_high_scores_from_path, save_high_scores_to_path,
    };

    #[test]
    fn table_keeps_best_ten_in_descending_order() {
        let mut scores = HighScores::default();

        for score in [5, 40, 12, 7, 99, 3, 60, 18, 25, 31, 2, 77] {
            scores.record(score, 1, 0);
        }

        let kept: Vec<u32> = scores.entries().iter().map(|entry| entry.score).collect();
        assert_eq!(kept, vec![99, 77, 60, 40, 31, 25, 18, 12, 7, 5]);
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), 99);
    }

    #[test]
    fn record_reports_rank_or_none() {
        let mut scores = HighScores::default();
        assert_eq!(scores.record(10, 1, 100), Some(1));
        assert_eq!(scores.record(30, 1, 101), Some(1));
        assert_eq!(scores.record(10, 2, 102), Some(3));

        for _ in 0..7 {
            scores.record(50, 1, 0);
        }
        assert_eq!(scores.record(1, 1, 0), None);
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn ties_keep_older_entry_first() {
        let mut scores = HighScores::default();
        scores.record(20, 1, 1);
        scores.record(20, 2, 2);

        assert_eq!(scores.entries()[0].recorded_at, 1);
        assert_eq!(scores.entries()[1].recorded_at, 2);
    }

    #[test]
    fn table_survives_save_and_load() {
        let path = unique_test_path("persist");
        let mut scores = HighScores::default();
        scores.record(42, 1, 1_700_000_000);
        scores.record(130, 2, 1_700_000_100);

        save_high_scores_to_path(&path, &scores).expect("score save should succeed");
        let loaded = load_high_scores_from_path(&path).expect("load should succeed");

        assert_eq!(loaded, scores);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_empty_table() {
        let path = unique_test_path("missing");
        let loaded = load_high_scores_from_path(&path).expect("missing file should be Ok");
        assert!(loaded.entries().is_empty());
    }

    #[test]
    fn malformed_score_file_returns_format_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(matches!(
            load_high_scores_from_path(&path),
            Err(ScoreError::Format { .. })
        ));

        cleanup_test_path(&path);
    }

    #[test]
    fn entries_render_a_minute_precision_date() {
        let entry = HighScoreEntry {
            score: 40,
            level: 1,
            recorded_at: 1_700_000_000,
        };

        let date = entry.recorded_date();
        assert_eq!(date.len(), "2023-11-14 22:13".len());
        assert!(date.starts_with("2023-11-1"));
        assert_eq!(format_timestamp(u64::MAX), "-");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("snake-arcade-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
