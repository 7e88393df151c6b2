//! Whole-file persistence of task totals.
//!
//! The data file is a single JSON object mapping task name to
//! `{ "total_time": <seconds> }`. It is always read and written in full;
//! there is no append log and no partial-write recovery.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "read": { "total_time": 12.0 },
//!   "write": { "total_time": 8.0 }
//! }
//! ```
//!
//! Extra per-record fields are ignored on load. Older files may carry a
//! `start_time` next to the total; it is dropped on the next save.
//!
//! ## Load Outcomes
//!
//! [`TaskStore::load`] reports what it found as a [`LoadOutcome`]:
//!
//! - **Loaded**: a valid task map
//! - **Missing**: no file at the path yet (the normal first run)
//! - **Unreadable**: the path exists but reading it failed
//! - **Corrupt**: the content is not JSON, or a total is negative or not a number
//!
//! Callers that just want tasks use [`TaskStore::load_or_default`], which logs
//! the last two cases with `tracing::warn!` and starts from an empty
//! collection. Save errors, on the other hand, are returned as
//! [`TrackerError::Persistence`].

use super::error::{TrackerError, TrackerResult};
use super::task::TaskCollection;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_DATA_FILE_NAME: &str = "tasks.json";

/// What was found at the data file path on load.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(TaskCollection),
    /// No file exists yet.
    Missing,
    /// The file exists but could not be read.
    Unreadable(io::Error),
    /// The file was read but is not a valid task map.
    Corrupt(serde_json::Error),
}

impl LoadOutcome {
    /// The loaded tasks, or an empty collection for every failure kind.
    pub fn into_collection(self) -> TaskCollection {
        match self {
            LoadOutcome::Loaded(tasks) => tasks,
            LoadOutcome::Missing | LoadOutcome::Unreadable(_) | LoadOutcome::Corrupt(_) => TaskCollection::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> LoadOutcome {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::Missing,
            Err(e) => return LoadOutcome::Unreadable(e),
        };
        match serde_json::from_str::<TaskCollection>(&content) {
            Ok(tasks) => LoadOutcome::Loaded(tasks),
            Err(e) => LoadOutcome::Corrupt(e),
        }
    }

    /// Loads the task file, falling back to an empty collection. Problems
    /// other than a missing file are logged but never surfaced.
    pub fn load_or_default(&self) -> TaskCollection {
        let outcome = self.load();
        match &outcome {
            LoadOutcome::Loaded(tasks) => debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks"),
            LoadOutcome::Missing => debug!(path = %self.path.display(), "no task file yet, starting empty"),
            LoadOutcome::Unreadable(e) => warn!(path = %self.path.display(), error = %e, "task file unreadable, starting empty"),
            LoadOutcome::Corrupt(e) => warn!(path = %self.path.display(), error = %e, "task file malformed, starting empty"),
        }
        outcome.into_collection()
    }

    /// Overwrites the data file with `tasks`.
    pub fn save(&self, tasks: &TaskCollection) -> TrackerResult<()> {
        self.write(tasks).map_err(|source| TrackerError::Persistence {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn write(&self, tasks: &TaskCollection) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        assert!(matches!(store.load(), LoadOutcome::Missing));
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();
        let store = TaskStore::new(&path);
        assert!(matches!(store.load(), LoadOutcome::Corrupt(_)));
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(TaskStore::new(&path).load(), LoadOutcome::Corrupt(_)));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path());
        assert!(matches!(store.load(), LoadOutcome::Unreadable(_)));
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("nested").join("tasks.json"));
        let mut tasks = TaskCollection::new();
        tasks.add_time("write", 1.25);
        store.save(&tasks).unwrap();
        assert!(store.load().is_loaded());
    }

    #[test]
    fn test_save_into_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path());
        let err = store.save(&TaskCollection::new()).unwrap_err();
        assert!(matches!(err, TrackerError::Persistence { .. }));
    }
}
