//! Display implementation for application messages.
//!
//! All user-facing text is defined here so wording stays consistent between
//! the interactive session and the one-shot commands.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TIMER MESSAGES ===
            Message::TaskStarted(name) => format!("Started task '{}'.", name),
            Message::TaskResumed(name) => format!("Resumed task '{}'.", name),
            Message::TaskAlreadyRunning(name) => format!("Task '{}' is already running.", name),
            Message::TaskPaused(name) => format!("Paused task '{}'.", name),
            Message::TaskAlreadyPaused(name) => format!("Task '{}' is already paused.", name),
            Message::TaskStopped { name, elapsed, total } => format!(
                "Stopped task '{}' after {:.2} seconds. Total time: {:.2} seconds.",
                name, elapsed, total
            ),
            Message::ResumeIgnoredName { requested, current } => format!(
                "Task '{}' is paused; resuming it instead of starting '{}'.",
                current, requested
            ),
            Message::NothingToResume => "No paused task to resume. Use 'start <name>' to begin a task.".to_string(),
            Message::TimerIdle => "No task is running.".to_string(),
            Message::TimerRunning(name, elapsed) => format!("'{}' is running. {}", name, elapsed),
            Message::TimerPaused(name, elapsed) => format!("'{}' is paused. {}", name, elapsed),

            // === TASK LIST MESSAGES ===
            Message::TasksHeader => "Tasks:".to_string(),
            Message::NoTasksRecorded => "No tasks recorded yet.".to_string(),

            // === EXPORT MESSAGES ===
            Message::TasksExported(path) => format!("Tasks exported to {}.", path),
            Message::DataExported(path) => format!("Data exported to {}", path),
            Message::AutosaveFailed(error) => format!("Failed to save tasks automatically: {}", error),
            Message::UnsavedChanges => "There are unsaved task totals. Use 'export' to keep them.".to_string(),
            Message::ActiveTaskDiscarded(name) => format!("Task '{}' was still active; its current interval was not recorded.", name),

            // === CHART MESSAGES ===
            Message::ChartNoData => "No tasks available to display in the chart.".to_string(),

            // === SESSION MESSAGES ===
            Message::SessionStarted(path) => format!("Task Time Tracker. Data file: {}. Type 'help' for commands.", path),
            Message::InputFailed(error) => format!("Failed to read input: {}", error),
            Message::SessionEnded => "Goodbye.".to_string(),
            Message::SessionHelp => [
                "Commands:",
                "  start <name>   start a task, or resume the paused one",
                "  pause          pause the running task",
                "  resume         resume the paused task",
                "  stop           stop the current task and add its time",
                "  show | list    list tasks with their total time",
                "  status         show the current task and elapsed time",
                "  export         save tasks to the data file",
                "  chart          show a bar chart of task times",
                "  help           show this help",
                "  quit | exit    leave the session",
            ]
            .join("\n"),
            Message::UnknownCommand(command) => format!("Unknown command '{}'. Type 'help' for commands.", command),
            Message::EmptyCommand => "Type 'help' for commands.".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNotFound => "Configuration file not found".to_string(),
            Message::ConfigModuleSession => "Session settings".to_string(),

            // === PROMPTS ===
            Message::PromptDataFile => "Enter the path of the task data file".to_string(),
            Message::PromptRefreshInterval => "Enter elapsed time refresh interval (seconds)".to_string(),
            Message::PromptAutosave => "Save tasks automatically after each stop?".to_string(),
            Message::PromptChartWidth => "Enter chart bar width (columns)".to_string(),
        };
        write!(f, "{}", text)
    }
}
