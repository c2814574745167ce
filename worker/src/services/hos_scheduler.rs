//! Hours-of-Service stop scheduling.
//!
//! Given a route summary and the hours the driver has already used in the
//! current cycle, this module simulates the trip leg by leg and decides where
//! fuel and rest stops go. Each leg ends in exactly one of three ways: a fuel
//! stop (the fuel range would be exceeded), the destination (the remaining
//! distance fits in the current driving budget), or a mandatory rest (an HOS
//! limit binds first).
//!
//! The simulation never touches the network. Stop locations are resolved after
//! scheduling through a [`StopLocator`] supplied by the caller, so the result
//! depends only on the inputs and the clock.

use chrono::{Duration, NaiveDateTime, Timelike};
use tracing::{debug, info, warn};

use crate::error::{PlanError, PlanResult};
use crate::types::{HosRules, LocationToken, RouteSummary, Stop, StopKind, TripPlan};

/// Budgets below this are treated as exhausted.
const HOURS_EPSILON: f64 = 1e-9;

/// Resolves a human-readable stop label ("fuel stop", "rest stop") to a location.
pub trait StopLocator {
    fn locate(&self, label: &str) -> Option<LocationToken>;
}

impl<F> StopLocator for F
where
    F: Fn(&str) -> Option<LocationToken>,
{
    fn locate(&self, label: &str) -> Option<LocationToken> {
        self(label)
    }
}

/// Locator that never finds anything; every stop gets the placeholder.
pub struct NoLocator;

impl StopLocator for NoLocator {
    fn locate(&self, _label: &str) -> Option<LocationToken> {
        None
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fractional hours as a chrono duration, millisecond precision.
pub(crate) fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

/// `time` plus fractional hours, or `InvalidInput` when the calendar runs out.
pub(crate) fn advance(time: NaiveDateTime, hours: f64) -> PlanResult<NaiveDateTime> {
    time.checked_add_signed(hours_to_duration(hours)).ok_or_else(|| {
        PlanError::InvalidInput(format!("departure time {} is too late to schedule the trip", time))
    })
}

fn truncate_to_hour(time: NaiveDateTime) -> NaiveDateTime {
    time.date().and_hms_opt(time.hour(), 0, 0).unwrap_or(time)
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Remaining HOS budgets. Only the simulation mutates these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CycleState {
    pub remaining_daily_driving: f64,
    pub remaining_daily_duty: f64,
    /// Never restored within a trip.
    pub remaining_cycle_hours: f64,
    pub miles_since_last_fuel: f64,
}

impl CycleState {
    fn new(rules: &HosRules, cycle_hours_used: f64) -> Self {
        Self {
            remaining_daily_driving: rules.max_daily_driving_hours,
            remaining_daily_duty: rules.max_daily_duty_hours,
            remaining_cycle_hours: rules.max_cycle_hours - cycle_hours_used,
            miles_since_last_fuel: 0.0,
        }
    }

    fn drivable_hours(&self) -> f64 {
        self.remaining_daily_driving
            .min(self.remaining_daily_duty)
            .min(self.remaining_cycle_hours)
    }

    fn drive(&mut self, hours: f64) {
        self.remaining_daily_driving -= hours;
        self.remaining_daily_duty -= hours;
        self.remaining_cycle_hours -= hours;
    }

    fn rest(&mut self, rules: &HosRules) {
        self.remaining_daily_driving = rules.max_daily_driving_hours;
        self.remaining_daily_duty = rules.max_daily_duty_hours;
    }
}

/// How a simulated leg ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LegOutcome {
    Fuel,
    Rest,
    Arrived,
}

pub(crate) struct TripSimulation<'a> {
    rules: &'a HosRules,
    total_miles: f64,
    pub state: CycleState,
    departure_time: NaiveDateTime,
    current_time: NaiveDateTime,
    miles_traveled: f64,
    hours_driven: f64,
    stops: Vec<Stop>,
}

impl<'a> TripSimulation<'a> {
    fn new(
        rules: &'a HosRules,
        route: &RouteSummary,
        cycle_hours_used: f64,
        departure_time: NaiveDateTime,
    ) -> Self {
        Self {
            rules,
            total_miles: route.distance_miles,
            state: CycleState::new(rules, cycle_hours_used),
            departure_time,
            current_time: departure_time,
            miles_traveled: 0.0,
            hours_driven: 0.0,
            stops: Vec::new(),
        }
    }

    fn is_complete(&self) -> bool {
        self.miles_traveled >= self.total_miles
    }

    fn push_stop(&mut self, kind: StopKind, arrival: NaiveDateTime, duration_hours: f64) -> PlanResult<()> {
        let departure = advance(arrival, duration_hours)?;
        debug!(
            "{} stop at mile {:.1}: {} -> {}",
            kind.as_str(),
            self.miles_traveled,
            arrival,
            departure
        );
        self.stops.push(Stop {
            kind,
            location: LocationToken::unknown(),
            arrival_time: arrival,
            departure_time: departure,
            rest_duration_hours: duration_hours,
            mile_marker: self.miles_traveled,
        });
        self.current_time = departure;
        Ok(())
    }

    /// Simulate one leg.
    fn step(&mut self) -> PlanResult<LegOutcome> {
        let rules = self.rules;
        let speed = rules.average_speed_mph;
        let remaining_miles = self.total_miles - self.miles_traveled;
        let drivable_hours = self.state.drivable_hours();

        if drivable_hours <= HOURS_EPSILON {
            if self.state.remaining_cycle_hours <= HOURS_EPSILON {
                return Err(PlanError::InfeasibleTrip {
                    miles_remaining: remaining_miles,
                    cycle_hours_remaining: self.state.remaining_cycle_hours.max(0.0),
                });
            }
            // Daily duty used up by stop time; rest where we are.
            self.push_stop(StopKind::Rest, self.current_time, rules.min_rest_hours)?;
            self.state.rest(rules);
            return Ok(LegOutcome::Rest);
        }

        let drivable_miles = drivable_hours * speed;
        let leg_miles = drivable_miles.min(remaining_miles);

        if self.state.miles_since_last_fuel + leg_miles > rules.fuel_distance_miles {
            let miles_to_fuel = rules.fuel_distance_miles - self.state.miles_since_last_fuel;
            let hours_to_fuel = miles_to_fuel / speed;

            self.miles_traveled += miles_to_fuel;
            self.hours_driven += hours_to_fuel;
            self.state.drive(hours_to_fuel);
            self.state.remaining_daily_duty -= rules.fuel_stop_hours;
            self.state.miles_since_last_fuel = 0.0;

            let arrival = advance(self.current_time, hours_to_fuel)?;
            self.push_stop(StopKind::Fuel, arrival, rules.fuel_stop_hours)?;
            return Ok(LegOutcome::Fuel);
        }

        let hours_needed = remaining_miles / speed;
        if hours_needed <= drivable_hours {
            self.miles_traveled = self.total_miles;
            self.hours_driven += hours_needed;
            self.state.drive(hours_needed);
            self.state.miles_since_last_fuel += remaining_miles;
            self.current_time = advance(self.current_time, hours_needed)?;
            return Ok(LegOutcome::Arrived);
        }

        self.miles_traveled += drivable_miles;
        self.hours_driven += drivable_hours;
        self.state.drive(drivable_hours);
        self.state.miles_since_last_fuel += drivable_miles;

        let arrival = advance(self.current_time, drivable_hours)?;
        self.push_stop(StopKind::Rest, arrival, rules.min_rest_hours)?;
        self.state.rest(rules);
        Ok(LegOutcome::Rest)
    }

    fn into_plan(self) -> TripPlan {
        TripPlan {
            total_miles: self.total_miles,
            total_driving_hours: self.hours_driven,
            departure_time: self.departure_time,
            estimated_arrival: self.current_time,
            stops: self.stops,
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Plans fuel and rest stops for a single-driver trip.
#[derive(Debug, Clone, Default)]
pub struct HosScheduler {
    rules: HosRules,
}

impl HosScheduler {
    pub fn new(rules: HosRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    fn validate(&self, route: &RouteSummary, cycle_hours_used: f64) -> PlanResult<()> {
        if let Some(name) = self.rules.first_invalid() {
            return Err(PlanError::InvalidInput(format!("HOS rule {} must be a positive number", name)));
        }
        if !(route.distance_miles > 0.0 && route.distance_miles.is_finite()) {
            return Err(PlanError::InvalidInput(format!(
                "distance must be positive, got {}",
                route.distance_miles
            )));
        }
        if !(route.duration_hours > 0.0 && route.duration_hours.is_finite()) {
            return Err(PlanError::InvalidInput(format!(
                "duration must be positive, got {}",
                route.duration_hours
            )));
        }
        if !(0.0..=self.rules.max_cycle_hours).contains(&cycle_hours_used) {
            return Err(PlanError::InvalidInput(format!(
                "cycle hours used must be within [0, {}], got {}",
                self.rules.max_cycle_hours, cycle_hours_used
            )));
        }
        Ok(())
    }

    fn start(
        &self,
        route: &RouteSummary,
        cycle_hours_used: f64,
        now: impl FnOnce() -> NaiveDateTime,
    ) -> PlanResult<TripSimulation<'_>> {
        self.validate(route, cycle_hours_used)?;
        let departure_time = truncate_to_hour(now());
        Ok(TripSimulation::new(&self.rules, route, cycle_hours_used, departure_time))
    }

    /// Schedule the trip.
    ///
    /// `now` is read once; departure is the top of that hour. Fails with
    /// [`PlanError::InfeasibleTrip`] when the cycle budget runs out before the
    /// destination, and with [`PlanError::InvalidInput`] for out-of-range input.
    /// A locator that finds nothing never fails the plan; the stop keeps the
    /// "unknown location" placeholder.
    pub fn schedule(
        &self,
        route: &RouteSummary,
        cycle_hours_used: f64,
        now: impl FnOnce() -> NaiveDateTime,
        locator: &dyn StopLocator,
    ) -> PlanResult<TripPlan> {
        let mut sim = self.start(route, cycle_hours_used, now)?;
        debug!(
            "Scheduling {:.1} mi (routed duration {:.2} h), cycle used {:.2} h, departing {}",
            route.distance_miles, route.duration_hours, cycle_hours_used, sim.departure_time
        );

        while !sim.is_complete() {
            sim.step()?;
        }

        let mut plan = sim.into_plan();
        // Logs need the midnight after arrival.
        if plan.estimated_arrival.date().succ_opt().is_none() {
            return Err(PlanError::InvalidInput(format!(
                "departure time {} is too late to schedule the trip",
                plan.departure_time
            )));
        }
        for stop in &mut plan.stops {
            stop.location = match locator.locate(stop.kind.label()) {
                Some(token) => token,
                None => {
                    warn!(
                        "Location unresolved for {} at mile {:.1}, using placeholder",
                        stop.kind.label(),
                        stop.mile_marker
                    );
                    LocationToken::unknown()
                }
            };
        }

        info!(
            "Trip scheduled: {:.1} mi, {:.2} h driving, {} stops, arrival {}",
            plan.total_miles,
            plan.total_driving_hours,
            plan.stops.len(),
            plan.estimated_arrival
        );
        Ok(plan)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn route(miles: f64) -> RouteSummary {
        RouteSummary { distance_miles: miles, duration_hours: miles / 55.0 + 2.0 }
    }

    fn plan(miles: f64, cycle_used: f64) -> TripPlan {
        HosScheduler::default()
            .schedule(&route(miles), cycle_used, || at(8, 0), &NoLocator)
            .unwrap()
    }

    fn span_hours(plan: &TripPlan) -> f64 {
        (plan.estimated_arrival - plan.departure_time).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Driving hours between consecutive events (departure, stops, arrival).
    fn driving_gaps(plan: &TripPlan) -> Vec<f64> {
        let mut cursor = plan.departure_time;
        let mut gaps = Vec::new();
        for stop in &plan.stops {
            gaps.push((stop.arrival_time - cursor).num_milliseconds() as f64 / 3_600_000.0);
            cursor = stop.departure_time;
        }
        gaps.push((plan.estimated_arrival - cursor).num_milliseconds() as f64 / 3_600_000.0);
        gaps
    }

    // -----------------------------------------------------------------------
    // Scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn short_trip_needs_no_stops() {
        let plan = HosScheduler::default()
            .schedule(
                &RouteSummary { distance_miles: 500.0, duration_hours: 9.09 },
                0.0,
                || at(8, 0),
                &NoLocator,
            )
            .unwrap();

        assert!(plan.stops.is_empty());
        assert_eq!(plan.total_miles, 500.0);
        assert!((plan.total_driving_hours - 500.0 / 55.0).abs() < 1e-9);
        assert_eq!(plan.departure_time, at(8, 0));
        assert_eq!(plan.estimated_arrival.date(), plan.departure_time.date());
    }

    #[test]
    fn twelve_hundred_miles_gets_one_fuel_stop_at_the_fuel_range() {
        let plan = plan(1200.0, 0.0);

        let fuel: Vec<_> = plan.stops.iter().filter(|s| s.kind == StopKind::Fuel).collect();
        assert_eq!(fuel.len(), 1);
        assert!((fuel[0].mile_marker - 1000.0).abs() < 1e-6);
        assert_eq!(fuel[0].departure_time - fuel[0].arrival_time, Duration::minutes(30));

        // 11 h driving from 08:00 forces one rest before the fuel stop.
        let kinds: Vec<_> = plan.stops.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StopKind::Rest, StopKind::Fuel]);
        assert_eq!(plan.stops[0].arrival_time, at(19, 0));
        assert_eq!((plan.estimated_arrival.date() - plan.departure_time.date()).num_days(), 1);
    }

    #[test]
    fn rests_reset_daily_budgets_but_not_the_cycle() {
        let rules = HosRules::default();
        let scheduler = HosScheduler::new(rules);
        let mut sim = scheduler.start(&route(4000.0), 0.0, || at(8, 0)).unwrap();

        let mut last_cycle = sim.state.remaining_cycle_hours;
        let mut rests = 0;
        let outcome = loop {
            match sim.step() {
                Ok(LegOutcome::Rest) => {
                    rests += 1;
                    assert_eq!(sim.state.remaining_daily_driving, 11.0);
                    assert_eq!(sim.state.remaining_daily_duty, 14.0);
                    let rest = sim.stops.last().unwrap();
                    assert_eq!(rest.departure_time - rest.arrival_time, Duration::hours(10));
                }
                Ok(LegOutcome::Fuel) => {}
                Ok(LegOutcome::Arrived) => break Ok(()),
                Err(e) => break Err(e),
            }
            assert!(sim.state.remaining_cycle_hours < last_cycle);
            last_cycle = sim.state.remaining_cycle_hours;
        };

        assert!(rests >= 1);
        // 4000 mi is 72.7 h of driving, more than a fresh 70 h cycle.
        assert!(matches!(outcome, Err(PlanError::InfeasibleTrip { .. })));
    }

    #[test]
    fn long_trip_completes_under_a_larger_cycle() {
        let rules = HosRules { max_cycle_hours: 100.0, ..HosRules::default() };
        let plan = HosScheduler::new(rules)
            .schedule(&route(4000.0), 0.0, || at(8, 0), &NoLocator)
            .unwrap();

        let rests = plan.stops.iter().filter(|s| s.kind == StopKind::Rest).count();
        let fuels = plan.stops.iter().filter(|s| s.kind == StopKind::Fuel).count();
        assert!(rests >= 6);
        assert_eq!(fuels, 3);
        assert!((plan.total_driving_hours - 4000.0 / 55.0).abs() < 1e-6);
    }

    #[test]
    fn nearly_exhausted_cycle_is_infeasible() {
        let err = HosScheduler::default()
            .schedule(&route(1000.0), 69.0, || at(8, 0), &NoLocator)
            .unwrap_err();

        match err {
            PlanError::InfeasibleTrip { miles_remaining, cycle_hours_remaining } => {
                assert!((miles_remaining - 945.0).abs() < 1e-6);
                assert!(cycle_hours_remaining.abs() < 1e-9);
            }
            other => panic!("expected InfeasibleTrip, got {:?}", other),
        }
    }

    #[test]
    fn fully_used_cycle_is_infeasible_not_invalid() {
        let err = HosScheduler::default()
            .schedule(&route(100.0), 70.0, || at(8, 0), &NoLocator)
            .unwrap_err();
        assert!(matches!(err, PlanError::InfeasibleTrip { .. }));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[test]
    fn hos_limits_hold_between_rests() {
        for miles in [300.0, 650.0, 1200.0, 2500.0, 3000.0] {
            let plan = plan(miles, 10.0);
            let gaps = driving_gaps(&plan);

            let mut driving = 0.0;
            let mut on_duty = 0.0;
            for (i, gap) in gaps.iter().enumerate() {
                driving += gap;
                on_duty += gap;
                assert!(driving <= 11.0 + 1e-6, "{} mi: {} h driving", miles, driving);
                assert!(on_duty <= 14.0 + 1e-6, "{} mi: {} h on duty", miles, on_duty);
                if let Some(stop) = plan.stops.get(i) {
                    match stop.kind {
                        StopKind::Rest => {
                            driving = 0.0;
                            on_duty = 0.0;
                        }
                        StopKind::Fuel => on_duty += stop.rest_duration_hours,
                    }
                }
            }
        }
    }

    #[test]
    fn fuel_stops_are_never_more_than_the_fuel_range_apart() {
        let rules = HosRules { max_cycle_hours: 200.0, ..HosRules::default() };
        let plan = HosScheduler::new(rules)
            .schedule(&route(6100.0), 0.0, || at(8, 0), &NoLocator)
            .unwrap();

        let mut last_fuel = 0.0;
        for stop in plan.stops.iter().filter(|s| s.kind == StopKind::Fuel) {
            assert!(stop.mile_marker - last_fuel <= 1000.0 + 1e-6);
            last_fuel = stop.mile_marker;
        }
        assert!(plan.total_miles - last_fuel <= 1000.0 + 1e-6);
    }

    #[test]
    fn stops_are_ordered_and_do_not_overlap() {
        let plan = plan(2500.0, 0.0);
        for pair in plan.stops.windows(2) {
            assert!(pair[0].departure_time <= pair[1].arrival_time);
        }
        for stop in &plan.stops {
            assert!(stop.departure_time > stop.arrival_time);
        }
    }

    #[test]
    fn driving_plus_stops_equals_trip_span() {
        let plan = plan(2500.0, 0.0);
        let stop_hours: f64 = plan.stops.iter().map(|s| s.rest_duration_hours).sum();
        assert!((plan.total_driving_hours + stop_hours - span_hours(&plan)).abs() < 1e-3);
        assert!(plan.estimated_arrival > plan.departure_time);
    }

    #[test]
    fn identical_inputs_give_identical_plans() {
        assert_eq!(plan(2500.0, 20.0), plan(2500.0, 20.0));
    }

    #[test]
    fn final_leg_does_not_overshoot_the_destination_for_fuel() {
        // After the first rest 605 mi are on the tank; the last 100 mi stay
        // under the fuel range, so no fuel stop is needed.
        let plan = plan(705.0, 0.0);
        assert_eq!(plan.stops.len(), 1);
        assert_eq!(plan.stops[0].kind, StopKind::Rest);
        assert!((plan.total_driving_hours - 705.0 / 55.0).abs() < 1e-9);
    }

    #[test]
    fn fuel_stop_that_exhausts_daily_duty_triggers_rest_in_place() {
        let rules = HosRules {
            max_daily_duty_hours: 10.4,
            fuel_distance_miles: 550.0,
            ..HosRules::default()
        };
        let plan = HosScheduler::new(rules)
            .schedule(&route(1000.0), 0.0, || at(8, 0), &NoLocator)
            .unwrap();

        let kinds: Vec<_> = plan.stops.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StopKind::Fuel, StopKind::Rest]);
        assert_eq!(plan.stops[1].arrival_time, plan.stops[0].departure_time);
        assert!((plan.stops[1].mile_marker - 550.0).abs() < 1e-6);
    }

    // -----------------------------------------------------------------------
    // Inputs, clock and locator
    // -----------------------------------------------------------------------

    #[test]
    fn departure_is_truncated_to_the_hour() {
        let plan = HosScheduler::default()
            .schedule(&route(100.0), 0.0, || at(8, 37), &NoLocator)
            .unwrap();
        assert_eq!(plan.departure_time, at(8, 0));
    }

    #[test]
    fn rejects_out_of_range_input() {
        let scheduler = HosScheduler::default();
        let cases = [
            (RouteSummary { distance_miles: 0.0, duration_hours: 1.0 }, 0.0),
            (RouteSummary { distance_miles: -5.0, duration_hours: 1.0 }, 0.0),
            (RouteSummary { distance_miles: f64::NAN, duration_hours: 1.0 }, 0.0),
            (RouteSummary { distance_miles: 100.0, duration_hours: 0.0 }, 0.0),
            (route(100.0), -1.0),
            (route(100.0), 70.5),
            (route(100.0), f64::NAN),
        ];
        for (route, cycle_used) in cases {
            let result = scheduler.schedule(&route, cycle_used, || at(8, 0), &NoLocator);
            assert!(
                matches!(result, Err(PlanError::InvalidInput(_))),
                "expected InvalidInput for {:?} / {}",
                route,
                cycle_used
            );
        }
    }

    #[test]
    fn departure_at_the_end_of_the_calendar_is_invalid_not_a_panic() {
        let scheduler = HosScheduler::default();

        let result = scheduler.schedule(&route(500.0), 0.0, || NaiveDateTime::MAX, &NoLocator);
        assert!(matches!(result, Err(PlanError::InvalidInput(_))), "{:?}", result);

        // Fits in time, but leaves no midnight to close the arrival day.
        let last_day = NaiveDateTime::MAX.date().and_hms_opt(1, 0, 0).unwrap();
        let result = scheduler.schedule(&route(100.0), 0.0, || last_day, &NoLocator);
        assert!(matches!(result, Err(PlanError::InvalidInput(_))), "{:?}", result);
    }

    #[test]
    fn advance_reports_overflow() {
        assert_eq!(advance(at(8, 0), 1.5).unwrap(), at(9, 30));
        assert!(matches!(advance(NaiveDateTime::MAX, 1.0), Err(PlanError::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_positive_rules() {
        let rules = HosRules { average_speed_mph: 0.0, ..HosRules::default() };
        let result = HosScheduler::new(rules).schedule(&route(100.0), 0.0, || at(8, 0), &NoLocator);
        assert!(matches!(result, Err(PlanError::InvalidInput(_))));
    }

    #[test]
    fn locator_is_asked_with_stop_labels() {
        let asked = RefCell::new(Vec::new());
        let token = LocationToken::Coordinates(crate::types::Coordinates { lat: 39.1, lng: -94.6 });
        let locator = |label: &str| {
            asked.borrow_mut().push(label.to_string());
            Some(token.clone())
        };

        let plan = HosScheduler::default()
            .schedule(&route(1200.0), 0.0, || at(8, 0), &locator)
            .unwrap();

        assert_eq!(*asked.borrow(), vec!["rest stop".to_string(), "fuel stop".to_string()]);
        assert!(plan.stops.iter().all(|s| s.location == token));
    }

    #[test]
    fn unresolved_locations_use_placeholder_and_same_schedule() {
        let located = HosScheduler::default()
            .schedule(&route(1200.0), 0.0, || at(8, 0), &|_: &str| {
                Some(LocationToken::Placeholder("Flying J".to_string()))
            })
            .unwrap();
        let unlocated = plan(1200.0, 0.0);

        assert!(unlocated.stops.iter().all(|s| s.location.is_unknown()));
        assert_eq!(unlocated.stops.len(), located.stops.len());
        for (a, b) in unlocated.stops.iter().zip(&located.stops) {
            assert_eq!(a.arrival_time, b.arrival_time);
            assert_eq!(a.departure_time, b.departure_time);
        }
    }
}
