//! Progress store - unlocked-level persistence
//!
//! Unlocked levels are kept as a set of indices and persisted as a single
//! comma-joined line (`"0,1,3"`). Level 0 is always unlocked. A missing
//! progress file simply means a fresh start.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tui_fifteen_core::ProgressStore;

/// The set of unlocked level indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    unlocked: BTreeSet<usize>,
}

impl Progress {
    /// Fresh progress: only the first level unlocked.
    pub fn new() -> Self {
        Self {
            unlocked: BTreeSet::from([0]),
        }
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        self.unlocked.contains(&index)
    }

    /// Unlock a level. Returns true when it was newly unlocked.
    pub fn unlock(&mut self, index: usize) -> bool {
        self.unlocked.insert(index)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn highest_unlocked(&self) -> usize {
        self.unlocked.iter().copied().max().unwrap_or(0)
    }

    /// Parse the comma-joined persistence format. Blank segments are
    /// ignored; level 0 is re-added unconditionally.
    pub fn parse(text: &str) -> Result<Self> {
        let mut unlocked = BTreeSet::new();
        for part in text.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let index: usize = part
                .parse()
                .with_context(|| format!("invalid level index {:?} in progress data", part))?;
            unlocked.insert(index);
        }
        unlocked.insert(0);
        Ok(Self { unlocked })
    }

    /// Read progress from disk. A missing file is a fresh start, not an
    /// error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::new()),
            Err(err) => {
                Err(err).with_context(|| format!("reading progress {}", path.display()))
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string())
            .with_context(|| format!("writing progress {}", path.display()))
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.unlocked {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}", index)?;
            first = false;
        }
        Ok(())
    }
}

/// File-backed progress store, notified when a level is solved.
///
/// Saves on each new unlock. A failed save is remembered for the caller to
/// surface instead of interrupting play.
#[derive(Debug)]
pub struct FileProgress {
    path: PathBuf,
    progress: Progress,
    last_save_error: Option<anyhow::Error>,
}

impl FileProgress {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let progress = Progress::load(&path)?;
        Ok(Self {
            path,
            progress,
            last_save_error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// The error of the most recent failed save, if any.
    pub fn take_save_error(&mut self) -> Option<anyhow::Error> {
        self.last_save_error.take()
    }
}

impl ProgressStore for FileProgress {
    fn unlock_next(&mut self, solved_level: usize) {
        if self.progress.unlock(solved_level + 1) {
            if let Err(err) = self.progress.save(&self.path) {
                self.last_save_error = Some(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tui-fifteen-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_fresh_progress_has_level_zero() {
        let progress = Progress::new();
        assert!(progress.is_unlocked(0));
        assert!(!progress.is_unlocked(1));
        assert_eq!(progress.unlocked_count(), 1);
        assert_eq!(progress.highest_unlocked(), 0);
    }

    #[test]
    fn test_display_is_comma_joined() {
        let mut progress = Progress::new();
        progress.unlock(1);
        progress.unlock(3);
        assert_eq!(progress.to_string(), "0,1,3");
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed = Progress::parse("0,1,3").unwrap();
        assert_eq!(parsed.to_string(), "0,1,3");
        assert!(parsed.is_unlocked(3));
        assert!(!parsed.is_unlocked(2));
    }

    #[test]
    fn test_parse_tolerates_blanks_and_reinstates_zero() {
        let parsed = Progress::parse("").unwrap();
        assert_eq!(parsed, Progress::new());

        let parsed = Progress::parse(" 2 , ,5,").unwrap();
        assert!(parsed.is_unlocked(0));
        assert!(parsed.is_unlocked(2));
        assert!(parsed.is_unlocked(5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Progress::parse("0,banana").is_err());
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut progress = Progress::new();
        assert!(progress.unlock(1));
        assert!(!progress.unlock(1));
        assert_eq!(progress.unlocked_count(), 2);
    }

    #[test]
    fn test_load_missing_file_is_fresh_start() {
        let progress = Progress::load(&temp_path("missing-progress")).unwrap();
        assert_eq!(progress, Progress::new());
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("round-trip");
        let mut progress = Progress::new();
        progress.unlock(1);
        progress.unlock(2);
        progress.save(&path).unwrap();

        let loaded = Progress::load(&path).unwrap();
        assert_eq!(loaded, progress);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_progress_unlocks_and_persists() {
        let path = temp_path("file-progress");
        let _ = fs::remove_file(&path);

        let mut store = FileProgress::load(&path).unwrap();
        store.unlock_next(0);
        assert!(store.progress().is_unlocked(1));
        assert!(store.take_save_error().is_none());

        // A second store sees the persisted unlock.
        let reloaded = FileProgress::load(&path).unwrap();
        assert!(reloaded.progress().is_unlocked(1));
        let _ = fs::remove_file(&path);
    }
}
