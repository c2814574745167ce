//! Regulatory defaults for single-driver, property-carrying US Hours-of-Service.

pub const MAX_DAILY_DRIVING_HOURS: f64 = 11.0;
pub const MAX_DAILY_DUTY_HOURS: f64 = 14.0;
pub const MIN_REST_HOURS: f64 = 10.0;
/// 70 hours in an 8-day cycle.
pub const MAX_CYCLE_HOURS: f64 = 70.0;
pub const FUEL_DISTANCE_MILES: f64 = 1000.0;
/// Applied once for pickup and once for dropoff by the route producer.
pub const PICKUP_DROPOFF_HOURS: f64 = 1.0;
pub const AVERAGE_SPEED_MPH: f64 = 55.0;
pub const FUEL_STOP_HOURS: f64 = 0.5;
pub const PRE_TRIP_INSPECTION_HOURS: f64 = 0.5;

/// Placeholder reported for stops whose location lookup came back empty.
pub const UNKNOWN_LOCATION: &str = "unknown location";

pub const METERS_PER_MILE: f64 = 1609.34;
