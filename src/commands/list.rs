use super::open_store;
use crate::libs::{formatter::task_line, messages::Message, view::View};
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show totals as a table with a grand total
    #[arg(long, short)]
    table: bool,
}

/// Prints the saved task totals.
pub fn cmd(list_args: ListArgs, file: Option<PathBuf>) -> Result<()> {
    let (_, store) = open_store(file)?;
    let tasks = store.load_or_default();

    if tasks.is_empty() {
        msg_info!(Message::NoTasksRecorded);
        return Ok(());
    }

    if list_args.table {
        View::tasks(&tasks);
    } else {
        msg_print!(Message::TasksHeader);
        for (name, record) in &tasks {
            println!("{}", task_line(name, record.total_time(), None));
        }
    }
    Ok(())
}
