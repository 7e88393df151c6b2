use super::formatter::format_hms;
use super::task::TaskCollection;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Task totals as a table with a grand total row.
    pub fn tasks_table(tasks: &TaskCollection) -> Table {
        let mut table = Table::new();

        table.add_row(row!["NAME", "SECONDS", "DURATION"]);
        for (name, record) in tasks {
            table.add_row(row![name, format!("{:.2}", record.total_time()), format_hms(record.total_time())]);
        }
        let total = tasks.grand_total();
        table.add_row(row!["TOTAL", format!("{:.2}", total), format_hms(total)]);

        table
    }

    pub fn tasks(tasks: &TaskCollection) {
        Self::tasks_table(tasks).printstd();
    }
}
