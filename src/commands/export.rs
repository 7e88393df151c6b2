//! Export of saved task totals for backup or spreadsheets.

use super::open_store;
use crate::{
    libs::{
        export::{ExportFormat, Exporter},
        messages::Message,
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    ///
    /// - **json**: same layout as the task data file
    /// - **csv**: `name,total_time` rows
    #[arg(short = 'F', long, value_enum, default_value = "json")]
    format: ExportFormat,

    /// Output file path
    ///
    /// Defaults to `tasktime_export_<YYYYMMDD_HHMMSS>.<ext>` in the current
    /// directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(export_args: ExportArgs, file: Option<PathBuf>) -> Result<()> {
    let (_, store) = open_store(file)?;
    let tasks = store.load_or_default();

    let exporter = Exporter::new(export_args.format, export_args.output);
    exporter.export(&tasks)?;

    msg_success!(Message::DataExported(exporter.output_path().display().to_string()));
    Ok(())
}
