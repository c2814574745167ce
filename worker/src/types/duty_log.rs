//! Duty-status log types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Duty status of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OffDuty,
    /// Part of the log vocabulary; the log builder never emits it.
    Sleeper,
    Driving,
    OnDuty,
}

impl DutyStatus {
    /// Row on the paper log grid, top to bottom.
    pub const fn row(self) -> u8 {
        match self {
            DutyStatus::OffDuty => 0,
            DutyStatus::Sleeper => 1,
            DutyStatus::Driving => 2,
            DutyStatus::OnDuty => 3,
        }
    }
}

/// One interval of a duty day, in fractional hours since midnight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub status: DutyStatus,
    pub start_hour: f64,
    pub end_hour: f64,
}

impl LogEntry {
    pub fn hours(&self) -> f64 {
        self.end_hour - self.start_hour
    }
}

/// The log for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyDay {
    pub date: NaiveDate,
    pub entries: Vec<LogEntry>,
    pub total_driving_hours: f64,
    pub total_on_duty_hours: f64,
    pub total_miles: f64,
}

/// Drawing command in (hour, row) space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo { hour: f64, row: u8 },
    LineTo { hour: f64, row: u8 },
}

/// Vector description of one day's duty-status graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogGraph {
    pub date: NaiveDate,
    pub path: Vec<PathCommand>,
}
