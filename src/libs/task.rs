//! Task totals: the records persisted to the data file.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// Accumulated time for a single task.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTaskRecord")]
pub struct TaskRecord {
    /// Seconds accumulated over all completed intervals.
    total_time: f64,
}

#[derive(Deserialize)]
struct RawTaskRecord {
    #[serde(default)]
    total_time: f64,
}

/// Rejected record totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidTotal(pub f64);

impl fmt::Display for InvalidTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "total_time must be a finite, non-negative number of seconds, got {}", self.0)
    }
}

impl std::error::Error for InvalidTotal {}

impl TryFrom<RawTaskRecord> for TaskRecord {
    type Error = InvalidTotal;

    fn try_from(raw: RawTaskRecord) -> Result<Self, Self::Error> {
        TaskRecord::new(raw.total_time)
    }
}

impl TaskRecord {
    pub fn new(total_time: f64) -> Result<Self, InvalidTotal> {
        if !total_time.is_finite() || total_time < 0.0 {
            return Err(InvalidTotal(total_time));
        }
        Ok(Self { total_time })
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Adds `seconds` to the total. Negative or non-finite input is ignored
    /// so the total can never go below zero.
    pub fn add(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.total_time += seconds;
        }
    }
}

/// All tracked tasks, keyed by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: BTreeMap<String, TaskRecord>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&TaskRecord> {
        self.tasks.get(name)
    }

    pub fn total_time(&self, name: &str) -> Option<f64> {
        self.get(name).map(TaskRecord::total_time)
    }

    /// Adds elapsed seconds to `name`, creating the record when it does not
    /// exist yet. Returns the new total.
    pub fn add_time(&mut self, name: &str, seconds: f64) -> f64 {
        let record = self.tasks.entry(name.to_string()).or_default();
        record.add(seconds);
        record.total_time()
    }

    /// Creates an empty record for `name` unless one exists. Returns `true`
    /// when a record was created.
    pub fn ensure(&mut self, name: &str) -> bool {
        if self.tasks.contains_key(name) {
            return false;
        }
        self.tasks.insert(name.to_string(), TaskRecord::default());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Sum of all task totals, in seconds.
    pub fn grand_total(&self) -> f64 {
        self.tasks.values().map(TaskRecord::total_time).sum()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, TaskRecord> {
        self.tasks.iter()
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = (&'a String, &'a TaskRecord);
    type IntoIter = btree_map::Iter<'a, String, TaskRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
