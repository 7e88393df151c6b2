pub mod chart;
pub mod export;
pub mod init;
pub mod list;
pub mod session;

use crate::libs::config::Config;
use crate::libs::store::TaskStore;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Time tasks interactively")]
    Session(session::SessionArgs),
    #[command(about = "List tasks with their total time")]
    List(list::ListArgs),
    #[command(about = "Show a bar chart of task times")]
    Chart(chart::ChartArgs),
    #[command(about = "Export task totals to a JSON or CSV file")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Task data file to use instead of the configured one
    #[arg(long, short, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        let file = cli.file;
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Session(args) => session::cmd(args, file).await,
            Commands::List(args) => list::cmd(args, file),
            Commands::Chart(args) => chart::cmd(args, file),
            Commands::Export(args) => export::cmd(args, file),
        }
    }
}

/// Reads the configuration and resolves the task store, honouring a
/// `--file` override.
pub(crate) fn open_store(file: Option<PathBuf>) -> Result<(Config, TaskStore)> {
    let config = Config::read()?;
    let path = match file {
        Some(path) => path,
        None => config.data_file_path()?,
    };
    Ok((config, TaskStore::new(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_file_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["tasktime", "list", "--file", "/tmp/tasks.json"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/tasks.json")));
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_export_format_parsing() {
        let cli = Cli::try_parse_from(["tasktime", "export", "-F", "csv", "-o", "out.csv"]).unwrap();
        assert!(matches!(cli.command, Commands::Export(_)));
        assert!(Cli::try_parse_from(["tasktime", "export", "--format", "xml"]).is_err());
    }
}
