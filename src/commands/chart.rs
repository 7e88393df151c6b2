use super::open_store;
use crate::libs::{chart::BarChart, messages::Message};
use crate::msg_info;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Width of the longest bar in columns (defaults to the configured width)
    #[arg(long, short)]
    width: Option<usize>,
}

/// Prints a bar chart of the saved task totals.
pub fn cmd(chart_args: ChartArgs, file: Option<PathBuf>) -> Result<()> {
    let (config, store) = open_store(file)?;
    let width = chart_args.width.unwrap_or_else(|| config.session().chart_width);

    match BarChart::from_tasks(&store.load_or_default()) {
        Some(chart) => print!("{}", chart.render(width)),
        None => msg_info!(Message::ChartNoData),
    }
    Ok(())
}
