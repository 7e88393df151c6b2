//! # tasktime
//!
//! A command-line utility for manually timing named tasks.
//!
//! ## Features
//!
//! - **Timer**: start, pause, resume and stop one task at a time
//! - **Totals**: cumulative seconds per task, saved to a JSON file
//! - **Reporting**: task list, table view and terminal bar chart
//! - **Export**: copy totals to JSON or CSV
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasktime::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
