//! The timer state machine.
//!
//! A timer is either idle, running a task, or holding a paused task. Each
//! variant carries exactly the timestamps that are meaningful in that state,
//! so a start time without a task (or a pause time without a start) cannot
//! be represented.
//!
//! ```text
//!            start(name)              pause()
//!   Idle ───────────────▶ Running ─────────────▶ Paused
//!    ▲                     │   ▲                  │
//!    │        stop()       │   └──── start(_) ────┤
//!    └─────────────────────┴───────── stop() ─────┘
//! ```
//!
//! Transitions take the current time as an argument; the timer itself never
//! reads a clock.
//!
//! ## Transition Rules
//!
//! - **start(name)**: blank names are rejected in every state. From `Idle` a
//!   new run begins. From `Paused` the paused task resumes and `name` is
//!   ignored; the start time moves forward by the length of the pause, so the
//!   elapsed time at resume equals the elapsed time at pause. From `Running`
//!   nothing changes.
//! - **pause()**: `Running` becomes `Paused`. Pausing twice keeps the first
//!   pause time. Fails with [`TrackerError::NoActiveTask`] when idle.
//! - **stop()**: returns the finished [`StoppedInterval`] and goes back to
//!   `Idle`. A paused run counts only up to the pause. Fails with
//!   [`TrackerError::NoActiveTask`] when idle.
//!
//! ## Elapsed Time
//!
//! [`TimerState::elapsed`] is a pure query: live while running, frozen while
//! paused, zero when idle. A clock that steps backwards yields zero rather
//! than a negative interval.

use super::error::{TrackerError, TrackerResult};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        task: String,
        started_at: DateTime<Utc>,
    },
    Paused {
        task: String,
        started_at: DateTime<Utc>,
        paused_at: DateTime<Utc>,
    },
}

/// Result of a successful `start`.
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    Started(String),
    /// The paused task was resumed. `requested` is the name passed to
    /// `start`, which is ignored when it differs from the paused task.
    Resumed { task: String, requested: String },
    AlreadyRunning(String),
}

/// Result of a successful `pause`.
#[derive(Debug, Clone, PartialEq)]
pub enum PauseOutcome {
    Paused(String),
    AlreadyPaused(String),
}

/// A finished interval handed back by `stop`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoppedInterval {
    pub task: String,
    pub elapsed: f64,
}

/// Seconds between two instants, clamped at zero when the wall clock has
/// moved backwards.
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    let seconds = delta.num_milliseconds() as f64 / 1000.0;
    seconds.max(0.0)
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> TimerStatus {
        match self {
            TimerState::Idle => TimerStatus::Idle,
            TimerState::Running { .. } => TimerStatus::Running,
            TimerState::Paused { .. } => TimerStatus::Paused,
        }
    }

    pub fn current_task(&self) -> Option<&str> {
        match self {
            TimerState::Idle => None,
            TimerState::Running { task, .. } | TimerState::Paused { task, .. } => Some(task),
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match self {
            TimerState::Idle => None,
            TimerState::Running { started_at, .. } | TimerState::Paused { started_at, .. } => Some(*started_at),
        }
    }

    pub fn paused_at(&self) -> Option<DateTime<Utc>> {
        match self {
            TimerState::Paused { paused_at, .. } => Some(*paused_at),
            _ => None,
        }
    }

    pub fn start(&mut self, name: &str, now: DateTime<Utc>) -> TrackerResult<StartOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }

        match self {
            TimerState::Idle => {
                *self = TimerState::Running {
                    task: name.to_string(),
                    started_at: now,
                };
                Ok(StartOutcome::Started(name.to_string()))
            }
            TimerState::Running { task, .. } => Ok(StartOutcome::AlreadyRunning(task.clone())),
            TimerState::Paused {
                task,
                started_at,
                paused_at,
            } => {
                // Shift the start forward by the pause so the paused span
                // never counts toward the elapsed time.
                let pause_span = (now - *paused_at).max(chrono::Duration::zero());
                let resumed = TimerState::Running {
                    task: task.clone(),
                    started_at: *started_at + pause_span,
                };
                let outcome = StartOutcome::Resumed {
                    task: task.clone(),
                    requested: name.to_string(),
                };
                *self = resumed;
                Ok(outcome)
            }
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> TrackerResult<PauseOutcome> {
        match self {
            TimerState::Idle => Err(TrackerError::NoActiveTask),
            TimerState::Paused { task, .. } => Ok(PauseOutcome::AlreadyPaused(task.clone())),
            TimerState::Running { task, started_at } => {
                let (task, started_at) = (task.clone(), *started_at);
                *self = TimerState::Paused {
                    task: task.clone(),
                    started_at,
                    paused_at: now,
                };
                Ok(PauseOutcome::Paused(task))
            }
        }
    }

    /// Ends the current run. A paused run counts only up to the moment it
    /// was paused.
    pub fn stop(&mut self, now: DateTime<Utc>) -> TrackerResult<StoppedInterval> {
        if *self == TimerState::Idle {
            return Err(TrackerError::NoActiveTask);
        }
        let elapsed = self.elapsed(now);
        match std::mem::take(self) {
            TimerState::Running { task, .. } | TimerState::Paused { task, .. } => Ok(StoppedInterval { task, elapsed }),
            TimerState::Idle => Err(TrackerError::NoActiveTask),
        }
    }

    /// Seconds of running time for the current task as of `now`. Frozen
    /// while paused, zero while idle.
    pub fn elapsed(&self, now: DateTime<Utc>) -> f64 {
        match self {
            TimerState::Idle => 0.0,
            TimerState::Running { started_at, .. } => seconds_between(*started_at, now),
            TimerState::Paused {
                started_at, paused_at, ..
            } => seconds_between(*started_at, *paused_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
    }

    #[test]
    fn test_start_from_idle() {
        let mut timer = TimerState::new();
        let outcome = timer.start("  write  ", at(0)).unwrap();
        assert_eq!(outcome, StartOutcome::Started("write".to_string()));
        assert_eq!(timer.status(), TimerStatus::Running);
        assert_eq!(timer.current_task(), Some("write"));
        assert_eq!(timer.started_at(), Some(at(0)));
        assert_eq!(timer.paused_at(), None);
    }

    #[test]
    fn test_start_rejects_blank_name() {
        let mut timer = TimerState::new();
        assert!(matches!(timer.start("   ", at(0)), Err(TrackerError::EmptyName)));
        assert_eq!(timer, TimerState::Idle);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut timer = TimerState::new();
        timer.start("write", at(0)).unwrap();
        let outcome = timer.start("read", at(4)).unwrap();
        assert_eq!(outcome, StartOutcome::AlreadyRunning("write".to_string()));
        assert_eq!(timer.started_at(), Some(at(0)));
        assert_eq!(timer.current_task(), Some("write"));
    }

    #[test]
    fn test_pause_and_stop_require_active_task() {
        let mut timer = TimerState::new();
        assert!(matches!(timer.pause(at(1)), Err(TrackerError::NoActiveTask)));
        assert!(matches!(timer.stop(at(1)), Err(TrackerError::NoActiveTask)));
        assert_eq!(timer, TimerState::Idle);
    }

    #[test]
    fn test_stop_running_counts_full_interval() {
        let mut timer = TimerState::new();
        timer.start("write", at(10)).unwrap();
        let interval = timer.stop(at(15)).unwrap();
        assert_eq!(interval.task, "write");
        assert_eq!(interval.elapsed, 5.0);
        assert_eq!(timer, TimerState::Idle);
    }

    #[test]
    fn test_stop_while_paused_excludes_pause() {
        let mut timer = TimerState::new();
        timer.start("write", at(0)).unwrap();
        timer.pause(at(2)).unwrap();
        let interval = timer.stop(at(30)).unwrap();
        assert_eq!(interval.elapsed, 2.0);
        assert_eq!(timer.status(), TimerStatus::Idle);
    }

    #[test]
    fn test_resume_shifts_start_and_ignores_new_name() {
        let mut timer = TimerState::new();
        timer.start("write", at(0)).unwrap();
        timer.pause(at(2)).unwrap();
        let elapsed_at_pause = timer.elapsed(at(5));

        let outcome = timer.start("read", at(5)).unwrap();
        assert_eq!(
            outcome,
            StartOutcome::Resumed {
                task: "write".to_string(),
                requested: "read".to_string()
            }
        );
        assert_eq!(timer.current_task(), Some("write"));
        assert_eq!(timer.started_at(), Some(at(3)));
        assert_eq!(timer.paused_at(), None);
        assert_eq!(timer.elapsed(at(5)), elapsed_at_pause);
    }

    #[test]
    fn test_pause_while_paused_keeps_first_pause() {
        let mut timer = TimerState::new();
        timer.start("write", at(0)).unwrap();
        timer.pause(at(2)).unwrap();
        let outcome = timer.pause(at(7)).unwrap();
        assert_eq!(outcome, PauseOutcome::AlreadyPaused("write".to_string()));
        assert_eq!(timer.paused_at(), Some(at(2)));
    }

    #[test]
    fn test_elapsed_by_state() {
        let mut timer = TimerState::new();
        assert_eq!(timer.elapsed(at(100)), 0.0);
        timer.start("write", at(0)).unwrap();
        assert_eq!(timer.elapsed(at(4)), 4.0);
        timer.pause(at(6)).unwrap();
        assert_eq!(timer.elapsed(at(60)), 6.0);
    }

    #[test]
    fn test_backwards_clock_clamps_to_zero() {
        let mut timer = TimerState::new();
        timer.start("write", at(100)).unwrap();
        let interval = timer.stop(at(90)).unwrap();
        assert_eq!(interval.elapsed, 0.0);
    }

    enum Step {
        Start(&'static str),
        Pause,
        Stop,
    }

    #[test]
    fn test_current_task_matches_status_over_sequence() {
        let mut timer = TimerState::new();
        let steps = [
            Step::Pause,
            Step::Start("a"),
            Step::Pause,
            Step::Start("b"),
            Step::Stop,
            Step::Stop,
            Step::Start(""),
            Step::Start("c"),
            Step::Start("d"),
        ];
        for (i, step) in steps.iter().enumerate() {
            let now = at(i as i64);
            let _ = match step {
                Step::Start(name) => timer.start(name, now).map(|_| ()),
                Step::Pause => timer.pause(now).map(|_| ()),
                Step::Stop => timer.stop(now).map(|_| ()),
            };
            let active = matches!(timer.status(), TimerStatus::Running | TimerStatus::Paused);
            assert_eq!(timer.current_task().is_some(), active);
            assert_eq!(timer.started_at().is_some(), active);
        }
    }
}
