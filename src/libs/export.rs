//! Export of task totals to standalone files.
//!
//! Unlike the data file, which is always JSON at a fixed location, an export
//! can be written anywhere and in either of two formats:
//!
//! - **JSON**: the same `{ name: { "total_time": seconds } }` shape as the
//!   data file, so an export can be used as a data file directly.
//! - **CSV**: a `name,total_time` table for spreadsheets.

use super::store::TaskStore;
use super::task::TaskCollection;
use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    total_time: f64,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is named
    /// `tasktime_export_<YYYYMMDD_HHMMSS>.<ext>` in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!(
                "tasktime_export_{}.{}",
                Local::now().format("%Y%m%d_%H%M%S"),
                format.extension()
            ))
        });
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, tasks: &TaskCollection) -> Result<()> {
        match self.format {
            ExportFormat::Json => TaskStore::new(&self.output_path).save(tasks)?,
            ExportFormat::Csv => self.export_csv(tasks)?,
        }
        Ok(())
    }

    fn export_csv(&self, tasks: &TaskCollection) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        for (name, record) in tasks {
            wtr.serialize(CsvRow {
                name,
                total_time: record.total_time(),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}
