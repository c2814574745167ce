//! Duty-status graph as drawing commands.
//!
//! A paper log draws the day as a step line across four rows. This produces
//! the same line in (hour, row) coordinates; scaling onto an image is left to
//! whoever renders it.

use crate::types::{DutyDay, LogGraph, PathCommand};

pub fn log_graph(day: &DutyDay) -> LogGraph {
    let mut path = Vec::with_capacity(day.entries.len() * 2 + 1);

    for entry in &day.entries {
        let row = entry.status.row();
        match path.last() {
            None => path.push(PathCommand::MoveTo { hour: entry.start_hour, row }),
            // Vertical transition at the status change.
            Some(_) => path.push(PathCommand::LineTo { hour: entry.start_hour, row }),
        }
        path.push(PathCommand::LineTo { hour: entry.end_hour, row });
    }

    LogGraph { date: day.date, path }
}

pub fn log_graphs(days: &[DutyDay]) -> Vec<LogGraph> {
    days.iter().map(log_graph).collect()
}
