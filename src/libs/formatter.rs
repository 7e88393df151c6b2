//! Text formatting for task totals and elapsed time.
//!
//! - Totals are shown in seconds with two decimals: `"write: 8.00 seconds"`.
//! - Elapsed time is shown as a clock: `"Elapsed: 00:01:05"`.
//!
//! Negative or non-finite inputs are treated as zero so formatting can never
//! fail.

use super::timer::TimerStatus;
use chrono::Duration;

/// Formats a whole number of seconds as `HH:MM:SS`. Hours are not wrapped
/// at 24, so long totals stay readable (`"100:00:00"`).
pub fn format_hms(seconds: f64) -> String {
    let duration = Duration::seconds(sanitize(seconds).floor() as i64);
    let hours = duration.num_hours();
    let minutes = duration.num_minutes() % 60;
    let secs = duration.num_seconds() % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// The elapsed time label shown while a task is active.
pub fn elapsed_label(seconds: f64) -> String {
    format!("Elapsed: {}", format_hms(seconds))
}

/// One line of the task list.
pub fn task_line(name: &str, total_time: f64, status: Option<TimerStatus>) -> String {
    let marker = match status {
        Some(TimerStatus::Running) => " (Running)",
        Some(TimerStatus::Paused) => " (Paused)",
        Some(TimerStatus::Idle) | None => "",
    };
    format!("{}: {:.2} seconds{}", name, sanitize(total_time), marker)
}

fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0.0), "00:00:00");
        assert_eq!(format_hms(5.9), "00:00:05");
        assert_eq!(format_hms(65.0), "00:01:05");
        assert_eq!(format_hms(3661.0), "01:01:01");
        assert_eq!(format_hms(360_000.0), "100:00:00");
    }

    #[test]
    fn test_format_hms_negative_clamped_to_zero() {
        assert_eq!(format_hms(-30.0), "00:00:00");
        assert_eq!(format_hms(f64::NAN), "00:00:00");
    }

    #[test]
    fn test_elapsed_label() {
        assert_eq!(elapsed_label(125.0), "Elapsed: 00:02:05");
    }

    #[test]
    fn test_task_line_markers() {
        assert_eq!(task_line("write", 8.0, None), "write: 8.00 seconds");
        assert_eq!(task_line("write", 1.005, Some(TimerStatus::Running)), "write: 1.00 seconds (Running)");
        assert_eq!(task_line("read", 0.0, Some(TimerStatus::Paused)), "read: 0.00 seconds (Paused)");
    }
}
