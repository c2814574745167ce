//! Daily duty-status log reconstruction.
//!
//! Turns a [`TripPlan`] into one [`DutyDay`] per calendar date the trip
//! touches. Each day starts with a pre-trip inspection, alternates driving
//! with the stops that fall on that date, and is padded with off-duty time so
//! that the entries cover `[0, 24)` hours exactly.
//!
//! Stops that run past midnight are split: the part after midnight opens the
//! next day and the inspection follows it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::services::hos_scheduler::hours_to_duration;
use crate::types::{DutyDay, DutyStatus, HosRules, LogEntry, Stop, StopKind, TripPlan};

/// Absolute-time piece of a stop.
#[derive(Debug, Clone, Copy)]
struct Segment {
    status: DutyStatus,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Fuel: on duty for the fuel-stop time, off duty for any remainder.
/// Rest: off duty throughout.
fn stop_segments(stop: &Stop, rules: &HosRules) -> Vec<Segment> {
    match stop.kind {
        StopKind::Fuel => {
            let fueled = stop
                .arrival_time
                .checked_add_signed(hours_to_duration(rules.fuel_stop_hours))
                .map_or(stop.departure_time, |end| end.min(stop.departure_time));
            let mut segments = vec![Segment {
                status: DutyStatus::OnDuty,
                start: stop.arrival_time,
                end: fueled,
            }];
            if stop.departure_time > fueled {
                segments.push(Segment {
                    status: DutyStatus::OffDuty,
                    start: fueled,
                    end: stop.departure_time,
                });
            }
            segments
        }
        StopKind::Rest => vec![Segment {
            status: DutyStatus::OffDuty,
            start: stop.arrival_time,
            end: stop.departure_time,
        }],
    }
}

/// Accumulates entries for one date, never emitting before the cursor.
struct DayLog {
    date: NaiveDate,
    midnight: NaiveDateTime,
    next_midnight: NaiveDateTime,
    cursor: NaiveDateTime,
    entries: Vec<LogEntry>,
    driving_hours: f64,
    on_duty_hours: f64,
}

impl DayLog {
    /// None for the last representable date, which has no closing midnight.
    fn new(date: NaiveDate) -> Option<Self> {
        let next_midnight = date.succ_opt()?.and_time(NaiveTime::MIN);
        let midnight = date.and_time(NaiveTime::MIN);
        Some(Self {
            date,
            midnight,
            next_midnight,
            cursor: midnight,
            entries: Vec::new(),
            driving_hours: 0.0,
            on_duty_hours: 0.0,
        })
    }

    fn hour_of(&self, time: NaiveDateTime) -> f64 {
        (time - self.midnight).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Append `[start, end)` clipped to `[cursor, next midnight)`.
    /// Zero-length results are dropped.
    fn push(&mut self, status: DutyStatus, start: NaiveDateTime, end: NaiveDateTime) {
        let start = start.max(self.cursor);
        let end = end.min(self.next_midnight);
        if end <= start {
            return;
        }

        let entry = LogEntry {
            status,
            start_hour: self.hour_of(start),
            end_hour: self.hour_of(end),
        };
        match status {
            DutyStatus::Driving => {
                self.driving_hours += entry.hours();
                self.on_duty_hours += entry.hours();
            }
            DutyStatus::OnDuty => self.on_duty_hours += entry.hours(),
            DutyStatus::OffDuty | DutyStatus::Sleeper => {}
        }
        self.entries.push(entry);
        self.cursor = end;
    }

    fn push_segment(&mut self, segment: Segment) {
        self.push(segment.status, segment.start, segment.end);
    }

    fn finish(mut self, average_speed_mph: f64) -> DutyDay {
        let (cursor, next_midnight) = (self.cursor, self.next_midnight);
        self.push(DutyStatus::OffDuty, cursor, next_midnight);

        debug_assert_eq!(self.entries.first().map(|e| e.start_hour), Some(0.0));
        debug_assert_eq!(self.entries.last().map(|e| e.end_hour), Some(24.0));
        debug_assert!(self.entries.windows(2).all(|w| w[0].end_hour == w[1].start_hour));

        DutyDay {
            date: self.date,
            entries: self.entries,
            total_driving_hours: self.driving_hours,
            total_on_duty_hours: self.on_duty_hours,
            total_miles: self.driving_hours * average_speed_mph,
        }
    }
}

/// Build the per-day duty logs for a trip, departure date through arrival date.
pub fn build_duty_logs(plan: &TripPlan, rules: &HosRules) -> Vec<DutyDay> {
    let inspection = hours_to_duration(rules.pre_trip_inspection_hours);
    let last_date = plan.estimated_arrival.date();
    let mut days = Vec::new();

    let mut date = plan.departure_time.date();
    while date <= last_date {
        let Some(mut day) = DayLog::new(date) else {
            break;
        };
        let midnight = day.midnight;
        let day_start = plan.departure_time.max(day.midnight);
        let day_end = plan.estimated_arrival.min(day.next_midnight);

        // Before departure on the first day.
        day.push(DutyStatus::OffDuty, midnight, day_start);

        // Stops running at midnight, including those that begin exactly then.
        for stop in plan
            .stops
            .iter()
            .filter(|s| s.arrival_time <= midnight && s.departure_time > midnight)
        {
            for segment in stop_segments(stop, rules) {
                day.push_segment(segment);
            }
        }

        if day.cursor < day_end {
            let inspection_start = day.cursor;
            let inspection_end = inspection_start
                .checked_add_signed(inspection)
                .unwrap_or(day.next_midnight);
            day.push(DutyStatus::OnDuty, inspection_start, inspection_end);
        }

        for stop in plan
            .stops
            .iter()
            .filter(|s| s.arrival_time.date() == date && s.arrival_time > midnight)
        {
            if day.cursor < stop.arrival_time {
                let cursor = day.cursor;
                day.push(DutyStatus::Driving, cursor, stop.arrival_time);
            }
            for segment in stop_segments(stop, rules) {
                day.push_segment(segment);
            }
        }

        if day.cursor < day_end {
            let cursor = day.cursor;
            day.push(DutyStatus::Driving, cursor, day_end);
        }

        days.push(day.finish(rules.average_speed_mph));
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    days
}
