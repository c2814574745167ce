//! Trip types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{DutyDay, HosRules, LogGraph};
use crate::defaults::{METERS_PER_MILE, UNKNOWN_LOCATION};

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Raw distance/duration of a multi-leg route as reported by a routing backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Route summary consumed by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub distance_miles: f64,
    /// Includes the pickup and dropoff overhead.
    pub duration_hours: f64,
}

impl RouteSummary {
    /// Convert a routing result to miles/hours and add pickup plus dropoff time.
    pub fn from_leg(leg: RouteLeg, rules: &HosRules) -> Self {
        Self {
            distance_miles: leg.distance_meters / METERS_PER_MILE,
            duration_hours: leg.duration_seconds / 3600.0 + 2.0 * rules.pickup_dropoff_hours,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Fuel,
    Rest,
}

impl StopKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            StopKind::Fuel => "fuel",
            StopKind::Rest => "rest",
        }
    }

    /// Free-text query used to look the stop up in a geocoder.
    pub const fn label(self) -> &'static str {
        match self {
            StopKind::Fuel => "fuel stop",
            StopKind::Rest => "rest stop",
        }
    }
}

/// Where a stop happens. Opaque to scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationToken {
    Coordinates(Coordinates),
    Placeholder(String),
}

impl LocationToken {
    pub fn unknown() -> Self {
        LocationToken::Placeholder(UNKNOWN_LOCATION.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, LocationToken::Placeholder(text) if text == UNKNOWN_LOCATION)
    }
}

/// A fuel or rest stop on the planned trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub kind: StopKind,
    pub location: LocationToken,
    pub arrival_time: NaiveDateTime,
    pub departure_time: NaiveDateTime,
    pub rest_duration_hours: f64,
    /// Cumulative miles driven when the stop is reached.
    pub mile_marker: f64,
}

/// Scheduler output. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub total_miles: f64,
    pub total_driving_hours: f64,
    pub departure_time: NaiveDateTime,
    pub estimated_arrival: NaiveDateTime,
    pub stops: Vec<Stop>,
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Plan a trip from place names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Hours already used in the current 70-hour/8-day cycle.
    #[serde(default)]
    pub current_cycle_used: f64,
    /// Overrides "now" as the departure clock.
    #[serde(default)]
    pub departure_time: Option<NaiveDateTime>,
}

/// Plan a trip from an already computed route summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub distance_miles: f64,
    pub duration_hours: f64,
    #[serde(default)]
    pub current_cycle_used: f64,
    #[serde(default)]
    pub departure_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanResponse {
    pub route: RouteSummary,
    pub trip: TripPlan,
    pub duty_logs: Vec<DutyDay>,
    pub log_graphs: Vec<LogGraph>,
}
