//! Terminal bar chart comparing task totals.

use super::task::TaskCollection;
use std::fmt::Write;

pub const CHART_TITLE: &str = "Task Time Comparison";
pub const CATEGORY_AXIS_LABEL: &str = "Tasks";
pub const VALUE_AXIS_LABEL: &str = "Total Time (seconds)";
pub const DEFAULT_CHART_WIDTH: usize = 40;

const BAR: char = '█';

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Horizontal bar chart: one row per task, bar length proportional to the
/// task's total time.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    bars: Vec<Bar>,
}

impl BarChart {
    /// Returns `None` when there are no tasks to plot.
    pub fn from_tasks(tasks: &TaskCollection) -> Option<Self> {
        if tasks.is_empty() {
            return None;
        }
        let bars = tasks
            .iter()
            .map(|(name, record)| Bar {
                label: name.clone(),
                value: record.total_time(),
            })
            .collect();
        Some(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }

    /// Number of bar cells for `value` when the largest value fills `width`.
    /// Any non-zero value gets at least one cell.
    pub fn bar_len(&self, value: f64, width: usize) -> usize {
        let max = self.max_value();
        if max <= 0.0 || value <= 0.0 || width == 0 {
            return 0;
        }
        let cells = (value / max * width as f64).round() as usize;
        cells.clamp(1, width)
    }

    pub fn render(&self, width: usize) -> String {
        let label_width = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(CATEGORY_AXIS_LABEL.len());

        let mut out = String::new();
        let _ = writeln!(out, "{}", CHART_TITLE);
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<label_width$} │ {}", CATEGORY_AXIS_LABEL, VALUE_AXIS_LABEL);
        let _ = writeln!(out, "{}─┼─{}", "─".repeat(label_width), "─".repeat(width.max(1) + 10));
        for bar in &self.bars {
            let cells = self.bar_len(bar.value, width);
            let _ = writeln!(
                out,
                "{:<label_width$} │ {} {:.2}",
                bar.label,
                BAR.to_string().repeat(cells),
                bar.value
            );
        }
        out
    }
}
