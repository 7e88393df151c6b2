//! Configuration for tasktime.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). Every section is optional; a missing file or section
//! falls back to defaults, so the application works without ever running
//! `tasktime init`.
//!
//! ```json
//! {
//!   "data_file": "/home/me/tasks.json",
//!   "session": { "refresh_interval": 1, "autosave": false, "chart_width": 40 }
//! }
//! ```

use super::chart::DEFAULT_CHART_WIDTH;
use super::data_storage::DataStorage;
use super::store::DEFAULT_DATA_FILE_NAME;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings for the interactive session.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Seconds between elapsed-time refreshes.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// Save the task file after every stop.
    #[serde(default)]
    pub autosave: bool,

    /// Width of the longest chart bar, in columns.
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_refresh_interval() -> u64 {
    1
}

fn default_chart_width() -> usize {
    DEFAULT_CHART_WIDTH
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            refresh_interval: default_refresh_interval(),
            autosave: false,
            chart_width: default_chart_width(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionConfig>,
}

impl Config {
    fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    pub fn read() -> Result<Config> {
        let config_file_path = Self::path()?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file = File::create(Self::path()?)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` when there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = Self::path()?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// The task data file: the configured path, or `tasks.json` in the data
    /// directory.
    pub fn data_file_path(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DEFAULT_DATA_FILE_NAME),
        }
    }

    pub fn session(&self) -> SessionConfig {
        self.session.clone().unwrap_or_default()
    }

    /// Interactive setup wizard. Current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let data_file = config.data_file_path()?;
        let data_file: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDataFile.to_string())
            .default(data_file.display().to_string())
            .interact_text()?;
        config.data_file = Some(PathBuf::from(data_file.trim()));

        let default = config.session();
        msg_print!(Message::ConfigModuleSession);
        config.session = Some(SessionConfig {
            refresh_interval: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRefreshInterval.to_string())
                .default(default.refresh_interval)
                .validate_with(|value: &u64| if *value > 0 { Ok(()) } else { Err("must be at least 1") })
                .interact_text()?,

            autosave: Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAutosave.to_string())
                .default(default.autosave)
                .interact()?,

            chart_width: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptChartWidth.to_string())
                .default(default.chart_width)
                .interact_text()?,
        });

        Ok(config)
    }
}
