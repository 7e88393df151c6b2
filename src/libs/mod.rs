//! Core library modules for tasktime.
//!
//! - [`timer`]: the idle/running/paused state machine
//! - [`task`] and [`store`]: task totals and their JSON file
//! - [`tracker`]: the controller combining the two with a [`clock`]
//! - [`formatter`], [`view`], [`chart`], [`export`]: presentation
//! - [`config`], [`data_storage`], [`messages`], [`logging`]: plumbing
//!
//! ```rust,no_run
//! use tasktime::libs::store::TaskStore;
//! use tasktime::libs::tracker::{Tracker, TrackerSettings};
//!
//! let mut tracker = Tracker::open(TaskStore::new("tasks.json"), TrackerSettings::default());
//! tracker.start("write")?;
//! let summary = tracker.stop()?;
//! tracker.export()?;
//! # Ok::<(), tasktime::libs::error::TrackerError>(())
//! ```

pub mod chart;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod logging;
pub mod messages;
pub mod store;
pub mod task;
pub mod timer;
pub mod tracker;
pub mod view;
