//! Hours-of-Service rule set

use serde::{Deserialize, Serialize};

use crate::defaults::{
    AVERAGE_SPEED_MPH, FUEL_DISTANCE_MILES, FUEL_STOP_HOURS, MAX_CYCLE_HOURS,
    MAX_DAILY_DRIVING_HOURS, MAX_DAILY_DUTY_HOURS, MIN_REST_HOURS, PICKUP_DROPOFF_HOURS,
    PRE_TRIP_INSPECTION_HOURS,
};

/// Immutable regulatory limits used by the scheduler and the log builder.
///
/// Fixed for the lifetime of a planning request; tests and other jurisdictions
/// construct their own instead of mutating a shared one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HosRules {
    pub max_daily_driving_hours: f64,
    pub max_daily_duty_hours: f64,
    pub min_rest_hours: f64,
    pub max_cycle_hours: f64,
    pub fuel_distance_miles: f64,
    pub pickup_dropoff_hours: f64,
    pub average_speed_mph: f64,
    pub fuel_stop_hours: f64,
    pub pre_trip_inspection_hours: f64,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            max_daily_driving_hours: MAX_DAILY_DRIVING_HOURS,
            max_daily_duty_hours: MAX_DAILY_DUTY_HOURS,
            min_rest_hours: MIN_REST_HOURS,
            max_cycle_hours: MAX_CYCLE_HOURS,
            fuel_distance_miles: FUEL_DISTANCE_MILES,
            pickup_dropoff_hours: PICKUP_DROPOFF_HOURS,
            average_speed_mph: AVERAGE_SPEED_MPH,
            fuel_stop_hours: FUEL_STOP_HOURS,
            pre_trip_inspection_hours: PRE_TRIP_INSPECTION_HOURS,
        }
    }
}

impl HosRules {
    /// Returns the name of the first limit that is not a positive finite number.
    pub fn first_invalid(&self) -> Option<&'static str> {
        let limits = [
            ("maxDailyDrivingHours", self.max_daily_driving_hours),
            ("maxDailyDutyHours", self.max_daily_duty_hours),
            ("minRestHours", self.min_rest_hours),
            ("maxCycleHours", self.max_cycle_hours),
            ("fuelDistanceMiles", self.fuel_distance_miles),
            ("averageSpeedMph", self.average_speed_mph),
            ("fuelStopHours", self.fuel_stop_hours),
            ("preTripInspectionHours", self.pre_trip_inspection_hours),
        ];
        if !(self.pickup_dropoff_hours >= 0.0 && self.pickup_dropoff_hours.is_finite()) {
            return Some("pickupDropoffHours");
        }
        limits
            .into_iter()
            .find(|(_, value)| !(*value > 0.0 && value.is_finite()))
            .map(|(name, _)| name)
    }
}
