//! Interactive timing session.
//!
//! Reads one command per line from stdin and applies it to a [`Tracker`].
//! A refresh tick runs alongside the input; with `--live` it redraws the
//! elapsed time while a task is running. Input, ticks and Ctrl-C are handled
//! by a single `select!` loop, so a tick never observes a half-applied
//! command.
//!
//! Stdin is read on a plain thread and handed over through a channel. A
//! blocking read cannot be cancelled, and Ctrl-C must not wait for the next
//! line.
//!
//! Errors from a command or from reading input are printed and the session
//! carries on.

use super::open_store;
use crate::libs::clock::Clock;
use crate::libs::messages::Message;
use crate::libs::timer::{PauseOutcome, StartOutcome, TimerStatus};
use crate::libs::tracker::{Tracker, TrackerSettings};
use crate::{msg_debug, msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;
use std::future::Future;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tokio::sync::mpsc;
use tokio::time::{self, Duration, MissedTickBehavior};

#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Redraw the elapsed time on every refresh tick while a task is running
    #[arg(long)]
    live: bool,

    /// Save the task file after every stop
    #[arg(long)]
    autosave: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// `start [name]`. Without a name, resumes the paused task.
    Start(Option<String>),
    Pause,
    Resume,
    Stop,
    Show,
    Status,
    Export,
    Chart,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = Message;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_lowercase().as_str() {
            "" => return Err(Message::EmptyCommand),
            "start" => SessionCommand::Start((!rest.is_empty()).then(|| rest.to_string())),
            "pause" => SessionCommand::Pause,
            "resume" => SessionCommand::Resume,
            "stop" => SessionCommand::Stop,
            "show" | "list" => SessionCommand::Show,
            "status" => SessionCommand::Status,
            "export" | "save" => SessionCommand::Export,
            "chart" => SessionCommand::Chart,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(Message::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Timing settings for [`run`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub live: bool,
    pub refresh_interval: Duration,
    pub chart_width: usize,
}

/// A line read from the input, or the error that stopped reading.
pub type InputLine = io::Result<String>;

pub async fn cmd(session_args: SessionArgs, file: Option<PathBuf>) -> Result<()> {
    let (config, store) = open_store(file)?;
    let session = config.session();
    let settings = TrackerSettings {
        autosave: session_args.autosave || session.autosave,
    };
    let options = SessionOptions {
        live: session_args.live,
        refresh_interval: Duration::from_secs(session.refresh_interval.max(1)),
        chart_width: session.chart_width,
    };
    let mut tracker = Tracker::open(store, settings);

    msg_print!(Message::SessionStarted(tracker.data_file().display().to_string()));
    show(&tracker);

    // The reader thread is left blocked on stdin when the session ends; it
    // goes away with the process.
    let input = spawn_stdin_reader();
    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    run(&mut tracker, input, shutdown, &options).await;
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<InputLine> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || forward_lines(std::io::stdin().lock(), &tx));
    rx
}

/// Forwards lines from a blocking reader. Stops at EOF or after sending the
/// first read error, and also once the receiver is gone. Bytes that are not
/// valid UTF-8 are replaced, so a garbled line reaches the session as an
/// unknown command.
pub fn forward_lines<R: BufRead>(mut reader: R, tx: &mpsc::UnboundedSender<InputLine>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(Ok(String::from_utf8_lossy(&buf).into_owned())).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        }
    }
}

/// Runs the session until `quit` or the end of the input. A completed
/// `shutdown` future ends it early. Read errors are reported and the loop
/// keeps going; the closing warnings are printed however the session ends.
pub async fn run<C: Clock>(
    tracker: &mut Tracker<C>,
    mut input: mpsc::UnboundedReceiver<InputLine>,
    shutdown: impl Future<Output = ()>,
    options: &SessionOptions,
) {
    let mut ticker = time::interval(options.refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut live_line = LiveLine::default();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = input.recv() => {
                live_line.clear(&mut std::io::stderr());
                match line {
                    None => break,
                    Some(Err(e)) => msg_error!(Message::InputFailed(e.to_string())),
                    Some(Ok(line)) => match line.parse::<SessionCommand>() {
                        Ok(command) => {
                            if execute(tracker, command, options.chart_width) == Flow::Quit {
                                break;
                            }
                        }
                        Err(message) => msg_warning!(message),
                    },
                }
            }
            _ = ticker.tick() => {
                if options.live && tracker.status() == TimerStatus::Running {
                    live_line.draw(&mut std::io::stderr(), &tracker.elapsed_label());
                }
            }
            _ = &mut shutdown => {
                live_line.clear(&mut std::io::stderr());
                println!();
                break;
            }
        }
    }

    finish(tracker);
}

/// Applies one command to the tracker and reports the result.
pub fn execute<C: Clock>(tracker: &mut Tracker<C>, command: SessionCommand, chart_width: usize) -> Flow {
    msg_debug!(format!("session command: {:?}", command));
    match command {
        SessionCommand::Start(name) => {
            let name = match (name, tracker.status(), tracker.current_task()) {
                (Some(name), _, _) => name,
                (None, TimerStatus::Paused, Some(current)) => current.to_string(),
                (None, _, _) => String::new(),
            };
            start(tracker, &name);
        }
        SessionCommand::Resume => match (tracker.status(), tracker.current_task()) {
            (TimerStatus::Paused, Some(current)) => {
                let current = current.to_string();
                start(tracker, &current);
            }
            (TimerStatus::Running, Some(current)) => msg_info!(Message::TaskAlreadyRunning(current.to_string())),
            _ => msg_warning!(Message::NothingToResume),
        },
        SessionCommand::Pause => match tracker.pause() {
            Ok(PauseOutcome::Paused(task)) => msg_success!(Message::TaskPaused(task)),
            Ok(PauseOutcome::AlreadyPaused(task)) => msg_info!(Message::TaskAlreadyPaused(task)),
            Err(e) => msg_error!(e),
        },
        SessionCommand::Stop => match tracker.stop() {
            Ok(summary) => {
                msg_success!(Message::TaskStopped {
                    name: summary.task,
                    elapsed: summary.elapsed,
                    total: summary.total,
                });
                if let Some(e) = summary.autosave_error {
                    msg_error!(Message::AutosaveFailed(e.to_string()));
                }
            }
            Err(e) => msg_error!(e),
        },
        SessionCommand::Show => show(tracker),
        SessionCommand::Status => status(tracker),
        SessionCommand::Export => match tracker.export() {
            Ok(path) => msg_success!(Message::TasksExported(path.display().to_string())),
            Err(e) => msg_error!(e),
        },
        SessionCommand::Chart => match tracker.chart() {
            Some(chart) => print!("{}", chart.render(chart_width)),
            None => msg_info!(Message::ChartNoData),
        },
        SessionCommand::Help => msg_print!(Message::SessionHelp),
        SessionCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn start<C: Clock>(tracker: &mut Tracker<C>, name: &str) {
    match tracker.start(name) {
        Ok(StartOutcome::Started(task)) => msg_success!(Message::TaskStarted(task)),
        Ok(StartOutcome::Resumed { task, requested }) => {
            if requested != task {
                msg_warning!(Message::ResumeIgnoredName {
                    requested,
                    current: task.clone(),
                });
            }
            msg_success!(Message::TaskResumed(task));
        }
        Ok(StartOutcome::AlreadyRunning(task)) => msg_info!(Message::TaskAlreadyRunning(task)),
        Err(e) => msg_error!(e),
    }
}

fn show<C: Clock>(tracker: &Tracker<C>) {
    let lines = tracker.task_lines();
    if lines.is_empty() {
        msg_info!(Message::NoTasksRecorded);
        return;
    }
    msg_print!(Message::TasksHeader);
    for line in lines {
        println!("{}", line);
    }
    if tracker.current_task().is_some() {
        println!("{}", tracker.elapsed_label());
    }
}

fn status<C: Clock>(tracker: &Tracker<C>) {
    match (tracker.status(), tracker.current_task()) {
        (TimerStatus::Running, Some(task)) => msg_info!(Message::TimerRunning(task.to_string(), tracker.elapsed_label())),
        (TimerStatus::Paused, Some(task)) => msg_info!(Message::TimerPaused(task.to_string(), tracker.elapsed_label())),
        _ => msg_info!(Message::TimerIdle),
    }
}

/// The live elapsed line on stderr. It has no trailing newline, so it is
/// wiped before anything else is printed.
#[derive(Debug, Default)]
struct LiveLine {
    drawn: bool,
}

impl LiveLine {
    fn draw<W: Write>(&mut self, out: &mut W, label: &str) {
        let _ = write!(out, "\r\x1b[K⏱ {}", label);
        let _ = out.flush();
        self.drawn = true;
    }

    fn clear<W: Write>(&mut self, out: &mut W) {
        if std::mem::take(&mut self.drawn) {
            let _ = write!(out, "\r\x1b[K");
            let _ = out.flush();
        }
    }
}

/// Warnings about state that is lost when the session ends now.
pub fn closing_warnings<C: Clock>(tracker: &Tracker<C>) -> Vec<Message> {
    let mut warnings = Vec::new();
    if let Some(task) = tracker.current_task() {
        warnings.push(Message::ActiveTaskDiscarded(task.to_string()));
    }
    if tracker.has_unsaved_changes() {
        warnings.push(Message::UnsavedChanges);
    }
    warnings
}

fn finish<C: Clock>(tracker: &Tracker<C>) {
    for warning in closing_warnings(tracker) {
        msg_warning!(warning);
    }
    msg_print!(Message::SessionEnded);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::clock::ManualClock;
    use crate::libs::store::TaskStore;
    use tempfile::TempDir;

    fn tracker() -> (TempDir, ManualClock, Tracker<ManualClock>) {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::default();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        let tracker = Tracker::with_clock(store, clock.clone(), TrackerSettings::default());
        (dir, clock, tracker)
    }

    fn run_line(tracker: &mut Tracker<ManualClock>, line: &str) -> Flow {
        execute(tracker, line.parse().unwrap(), 20)
    }

    fn options() -> SessionOptions {
        SessionOptions {
            live: false,
            refresh_interval: Duration::from_secs(1),
            chart_width: 20,
        }
    }

    fn input(lines: Vec<InputLine>) -> mpsc::UnboundedReceiver<InputLine> {
        let (tx, rx) = mpsc::unbounded_channel();
        for line in lines {
            tx.send(line).unwrap();
        }
        rx
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<InputLine>) -> Vec<InputLine> {
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    struct BrokenReader;

    impl io::Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("start deep work".parse(), Ok(SessionCommand::Start(Some("deep work".to_string()))));
        assert_eq!("START   write  ".parse(), Ok(SessionCommand::Start(Some("write".to_string()))));
        assert_eq!("start".parse(), Ok(SessionCommand::Start(None)));
        assert_eq!("list".parse(), Ok(SessionCommand::Show));
        assert_eq!("exit".parse(), Ok(SessionCommand::Quit));
        assert_eq!("save".parse(), Ok(SessionCommand::Export));
    }

    #[test]
    fn test_parse_rejects_empty_and_unknown() {
        assert!(matches!("   ".parse::<SessionCommand>(), Err(Message::EmptyCommand)));
        assert!(matches!(
            "jump".parse::<SessionCommand>(),
            Err(Message::UnknownCommand(ref c)) if c == "jump"
        ));
    }

    #[test]
    fn test_start_without_name_resumes_paused_task() {
        let (_dir, clock, mut tracker) = tracker();
        run_line(&mut tracker, "start write");
        clock.advance_secs(2);
        run_line(&mut tracker, "pause");
        clock.advance_secs(3);
        run_line(&mut tracker, "start");
        assert_eq!(tracker.status(), TimerStatus::Running);
        clock.advance_secs(1);
        run_line(&mut tracker, "stop");
        assert_eq!(tracker.tasks().total_time("write"), Some(3.0));
    }

    #[test]
    fn test_start_without_name_while_idle_stays_idle() {
        let (_dir, _clock, mut tracker) = tracker();
        run_line(&mut tracker, "start");
        assert_eq!(tracker.status(), TimerStatus::Idle);
    }

    #[test]
    fn test_resume_command() {
        let (_dir, clock, mut tracker) = tracker();
        run_line(&mut tracker, "resume");
        assert_eq!(tracker.status(), TimerStatus::Idle);
        run_line(&mut tracker, "start write");
        run_line(&mut tracker, "pause");
        clock.advance_secs(10);
        run_line(&mut tracker, "resume");
        assert_eq!(tracker.status(), TimerStatus::Running);
        assert_eq!(tracker.elapsed(), 0.0);
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let (_dir, _clock, mut tracker) = tracker();
        assert_eq!(run_line(&mut tracker, "stop"), Flow::Continue);
        assert_eq!(run_line(&mut tracker, "pause"), Flow::Continue);
        assert_eq!(run_line(&mut tracker, "chart"), Flow::Continue);
        assert_eq!(run_line(&mut tracker, "quit"), Flow::Quit);
    }

    #[test]
    fn test_export_command_writes_data_file() {
        let (dir, clock, mut tracker) = tracker();
        run_line(&mut tracker, "start write");
        clock.advance_secs(4);
        run_line(&mut tracker, "stop");
        run_line(&mut tracker, "export");
        let saved = TaskStore::new(dir.path().join("tasks.json")).load_or_default();
        assert_eq!(saved.total_time("write"), Some(4.0));
        assert!(!tracker.has_unsaved_changes());
    }

    #[test]
    fn test_forward_lines_replaces_invalid_utf8() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        forward_lines(&b"start write\n\xff\xfe\nstop"[..], &tx);
        drop(tx);

        let lines: Vec<String> = drain(&mut rx).into_iter().map(|line| line.unwrap()).collect();
        assert_eq!(lines, vec!["start write\n", "\u{FFFD}\u{FFFD}\n", "stop"]);
        assert!(matches!(
            lines[1].parse::<SessionCommand>(),
            Err(Message::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_forward_lines_stops_after_read_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        forward_lines(io::BufReader::new(BrokenReader), &tx);

        let lines = drain(&mut rx);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_ref().unwrap_err().to_string(), "device gone");
    }

    #[tokio::test]
    async fn test_session_survives_bad_input() {
        let (dir, _clock, mut tracker) = tracker();
        let lines = input(vec![
            Ok("start write\n".to_string()),
            Ok("\u{FFFD}\u{FFFD}\n".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad read")),
            Ok("stop\n".to_string()),
            Ok("export\n".to_string()),
        ]);

        run(&mut tracker, lines, std::future::pending(), &options()).await;

        assert_eq!(tracker.status(), TimerStatus::Idle);
        let saved = TaskStore::new(dir.path().join("tasks.json")).load_or_default();
        assert_eq!(saved.total_time("write"), Some(0.0));
        assert!(closing_warnings(&tracker).is_empty());
    }

    #[tokio::test]
    async fn test_session_end_of_input_warns_about_active_task() {
        let (_dir, _clock, mut tracker) = tracker();
        let lines = input(vec![Ok("start write\n".to_string()), Ok("pause\n".to_string())]);

        run(&mut tracker, lines, std::future::pending(), &options()).await;

        assert_eq!(tracker.current_task(), Some("write"));
        assert_eq!(
            closing_warnings(&tracker),
            vec![Message::ActiveTaskDiscarded("write".to_string()), Message::UnsavedChanges]
        );
    }

    #[tokio::test]
    async fn test_session_quit_skips_remaining_input() {
        let (_dir, _clock, mut tracker) = tracker();
        let lines = input(vec![Ok("quit\n".to_string()), Ok("start write\n".to_string())]);

        run(&mut tracker, lines, std::future::pending(), &options()).await;

        assert_eq!(tracker.status(), TimerStatus::Idle);
        assert!(tracker.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_session_ends_on_shutdown_while_input_is_open() {
        let (_dir, _clock, mut tracker) = tracker();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Ok("start write\n".to_string())).unwrap();

        let ended = time::timeout(Duration::from_secs(5), run(&mut tracker, rx, async {}, &options())).await;

        assert!(ended.is_ok());
        drop(tx);
    }

    #[test]
    fn test_live_line_is_cleared_once() {
        let mut live_line = LiveLine::default();
        let mut out = Vec::new();
        live_line.clear(&mut out);
        assert!(out.is_empty());

        live_line.draw(&mut out, "Elapsed: 00:00:03");
        live_line.clear(&mut out);
        live_line.clear(&mut out);
        assert_eq!(String::from_utf8(out).unwrap(), "\r\x1b[K⏱ Elapsed: 00:00:03\r\x1b[K");
    }
}
