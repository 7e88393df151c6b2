#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === TIMER MESSAGES ===
    TaskStarted(String),
    TaskResumed(String),
    TaskAlreadyRunning(String),
    TaskPaused(String),
    TaskAlreadyPaused(String),
    TaskStopped {
        name: String,
        elapsed: f64,
        total: f64,
    },
    ResumeIgnoredName {
        requested: String,
        current: String,
    },
    NothingToResume,
    TimerIdle,
    TimerRunning(String, String), // task name, elapsed label
    TimerPaused(String, String),  // task name, elapsed label

    // === TASK LIST MESSAGES ===
    TasksHeader,
    NoTasksRecorded,

    // === EXPORT MESSAGES ===
    TasksExported(String),     // path
    DataExported(String),      // path
    AutosaveFailed(String),    // error
    UnsavedChanges,
    ActiveTaskDiscarded(String),

    // === CHART MESSAGES ===
    ChartNoData,

    // === SESSION MESSAGES ===
    SessionStarted(String), // data file path
    SessionEnded,
    SessionHelp,
    InputFailed(String), // error
    UnknownCommand(String),
    EmptyCommand,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleSession,

    // === PROMPTS ===
    PromptDataFile,
    PromptRefreshInterval,
    PromptAutosave,
    PromptChartWidth,
}
