//! The tracker ties the timer to the task totals and the data file.
//!
//! A [`Tracker`] is the one place where time, state and storage meet. The
//! command layer never touches the [`TimerState`] or the [`TaskStore`]
//! directly; it asks the tracker to start, pause or stop and prints what comes
//! back.
//!
//! ## Core Features
//!
//! - **Single Time Source**: every operation reads its [`Clock`] exactly once,
//!   so a transition and the interval it records always agree
//! - **Record Lifecycle**: the first start of a name creates an empty record;
//!   every stop adds the finished interval to it
//! - **Explicit Saving**: totals reach the data file on [`Tracker::export`], or
//!   after each stop when autosave is on
//! - **Unsaved Change Tracking**: the tracker knows whether the in-memory
//!   totals differ from what was last written
//!
//! ## Data Flow
//!
//! ```text
//!   Clock::now() ──▶ TimerState ──stop()──▶ TaskCollection ──export()──▶ TaskStore
//!                                                 │
//!                                                 └──▶ task_lines() / chart()
//! ```
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use tasktime::libs::store::TaskStore;
//! use tasktime::libs::tracker::{Tracker, TrackerSettings};
//!
//! let mut tracker = Tracker::open(TaskStore::new("tasks.json"), TrackerSettings::default());
//! tracker.start("write")?;
//! let summary = tracker.stop()?;
//! println!("{} now at {:.2}s", summary.task, summary.total);
//! tracker.export()?;
//! # Ok::<(), tasktime::libs::error::TrackerError>(())
//! ```

use super::chart::BarChart;
use super::clock::{Clock, SystemClock};
use super::error::{TrackerError, TrackerResult};
use super::formatter::{elapsed_label, task_line};
use super::store::TaskStore;
use super::task::TaskCollection;
use super::timer::{PauseOutcome, StartOutcome, TimerState, TimerStatus};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerSettings {
    pub autosave: bool,
}

/// Summary of a finished interval.
#[derive(Debug)]
pub struct StopSummary {
    pub task: String,
    /// Seconds added by this interval.
    pub elapsed: f64,
    /// The task's total after the interval was added.
    pub total: f64,
    /// Set when autosave is on and writing the data file failed. The total
    /// above is kept in memory either way.
    pub autosave_error: Option<TrackerError>,
}

pub struct Tracker<C: Clock = SystemClock> {
    clock: C,
    timer: TimerState,
    tasks: TaskCollection,
    store: TaskStore,
    settings: TrackerSettings,
    dirty: bool,
}

impl Tracker<SystemClock> {
    pub fn open(store: TaskStore, settings: TrackerSettings) -> Self {
        Self::with_clock(store, SystemClock, settings)
    }
}

impl<C: Clock> Tracker<C> {
    /// Builds a tracker over the tasks in `store`. A missing or unreadable
    /// task file yields an empty collection.
    pub fn with_clock(store: TaskStore, clock: C, settings: TrackerSettings) -> Self {
        let tasks = store.load_or_default();
        Self {
            clock,
            timer: TimerState::new(),
            tasks,
            store,
            settings,
            dirty: false,
        }
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn status(&self) -> TimerStatus {
        self.timer.status()
    }

    pub fn current_task(&self) -> Option<&str> {
        self.timer.current_task()
    }

    pub fn data_file(&self) -> &Path {
        self.store.path()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Starts or resumes a task. Starting a name for the first time creates
    /// its record with a zero total.
    pub fn start(&mut self, name: &str) -> TrackerResult<StartOutcome> {
        let outcome = self.timer.start(name, self.clock.now())?;
        debug!(?outcome, "start");
        if let StartOutcome::Started(task) = &outcome {
            if self.tasks.ensure(task) {
                self.dirty = true;
            }
        }
        Ok(outcome)
    }

    pub fn pause(&mut self) -> TrackerResult<PauseOutcome> {
        let outcome = self.timer.pause(self.clock.now())?;
        debug!(?outcome, "pause");
        Ok(outcome)
    }

    /// Stops the current task and adds its elapsed time to the totals.
    ///
    /// With autosave on, the totals are written right away. A failed write
    /// does not undo the stop; it is carried in
    /// [`StopSummary::autosave_error`].
    pub fn stop(&mut self) -> TrackerResult<StopSummary> {
        let interval = self.timer.stop(self.clock.now())?;
        let total = self.tasks.add_time(&interval.task, interval.elapsed);
        self.dirty = true;
        info!(task = %interval.task, elapsed = interval.elapsed, total, "task stopped");

        let autosave_error = if self.settings.autosave {
            self.export().err()
        } else {
            None
        };
        if let Some(e) = &autosave_error {
            warn!(error = %e, "autosave failed");
        }

        Ok(StopSummary {
            task: interval.task,
            elapsed: interval.elapsed,
            total,
            autosave_error,
        })
    }

    /// Running seconds for the current task (frozen while paused, zero when
    /// idle).
    pub fn elapsed(&self) -> f64 {
        self.timer.elapsed(self.clock.now())
    }

    pub fn elapsed_label(&self) -> String {
        elapsed_label(self.elapsed())
    }

    /// The task list, one line per task, with the current task marked.
    pub fn task_lines(&self) -> Vec<String> {
        let current = self.timer.current_task();
        let status = self.timer.status();
        self.tasks
            .iter()
            .map(|(name, record)| {
                let marker = (current == Some(name.as_str())).then_some(status);
                task_line(name, record.total_time(), marker)
            })
            .collect()
    }

    /// Writes the totals to the data file. The interval of an active task is
    /// not included until it is stopped.
    pub fn export(&mut self) -> TrackerResult<&Path> {
        self.store.save(&self.tasks)?;
        self.dirty = false;
        Ok(self.store.path())
    }

    /// Bars for every recorded task, `None` when there are none. The width is
    /// chosen when rendering.
    pub fn chart(&self) -> Option<BarChart> {
        BarChart::from_tasks(&self.tasks)
    }
}
