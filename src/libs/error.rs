//! Error kinds raised by the timer and the task store.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// `start` was called with a blank task name.
    #[error("Task name cannot be empty!")]
    EmptyName,

    /// `pause` or `stop` was called while no task is active.
    #[error("No task is currently running.")]
    NoActiveTask,

    /// The task file could not be written.
    #[error("Failed to save tasks to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type TrackerResult<T> = Result<T, TrackerError>;
