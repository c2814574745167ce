//! Trip planning pipeline
//!
//! Place names → coordinates → route → HOS schedule → duty logs and graphs.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::error::{PlanError, PlanResult};
use crate::services::duty_log::build_duty_logs;
use crate::services::geocoding::Geocoder;
use crate::services::hos_scheduler::{HosScheduler, NoLocator, StopLocator};
use crate::services::log_graph::log_graphs;
use crate::services::routing::RoutingService;
use crate::types::{
    Coordinates, HosRules, LocationToken, RouteSummary, ScheduleRequest, StopKind, TripPlanRequest,
    TripPlanResponse,
};

pub struct TripPlanner {
    geocoder: Arc<dyn Geocoder>,
    routing: Arc<dyn RoutingService>,
    scheduler: HosScheduler,
}

impl TripPlanner {
    pub fn new(geocoder: Arc<dyn Geocoder>, routing: Arc<dyn RoutingService>, rules: HosRules) -> Self {
        Self {
            geocoder,
            routing,
            scheduler: HosScheduler::new(rules),
        }
    }

    /// Plan a trip from place names
    pub async fn plan(&self, request: &TripPlanRequest) -> PlanResult<TripPlanResponse> {
        info!(
            "Planning trip {} -> {} -> {} (geocoder: {}, routing: {})",
            request.current_location,
            request.pickup_location,
            request.dropoff_location,
            self.geocoder.name(),
            self.routing.name()
        );

        let current = self.locate_place(&request.current_location).await?;
        let pickup = self.locate_place(&request.pickup_location).await?;
        let dropoff = self.locate_place(&request.dropoff_location).await?;

        let leg = self.routing.route(&[current, pickup, dropoff]).await?;
        let route = RouteSummary::from_leg(leg, self.scheduler.rules());
        debug!("Route: {:.1} mi, {:.2} h", route.distance_miles, route.duration_hours);

        let labels = self.resolve_stop_labels(current).await;
        let locator = |label: &str| labels.get(label).cloned();

        self.build(route, request.current_cycle_used, request.departure_time, &locator)
    }

    /// Plan a trip from an already computed route summary
    pub fn schedule(&self, request: &ScheduleRequest) -> PlanResult<TripPlanResponse> {
        let route = RouteSummary {
            distance_miles: request.distance_miles,
            duration_hours: request.duration_hours,
        };
        self.build(route, request.current_cycle_used, request.departure_time, &NoLocator)
    }

    fn build(
        &self,
        route: RouteSummary,
        cycle_hours_used: f64,
        departure_time: Option<NaiveDateTime>,
        locator: &dyn StopLocator,
    ) -> PlanResult<TripPlanResponse> {
        let clock = move || departure_time.unwrap_or_else(|| chrono::Local::now().naive_local());

        let trip = self.scheduler.schedule(&route, cycle_hours_used, clock, locator)?;
        let duty_logs = build_duty_logs(&trip, self.scheduler.rules());
        let log_graphs = log_graphs(&duty_logs);

        Ok(TripPlanResponse {
            route,
            trip,
            duty_logs,
            log_graphs,
        })
    }

    async fn locate_place(&self, place: &str) -> PlanResult<Coordinates> {
        if place.trim().is_empty() {
            return Err(PlanError::InvalidInput("location must not be empty".to_string()));
        }

        match self.geocoder.geocode(place, None).await? {
            Some(result) => {
                debug!("Geocoded '{}' to {} ({}, {})",
                    place, result.display_name, result.coordinates.lat, result.coordinates.lng);
                Ok(result.coordinates)
            }
            None => Err(PlanError::LocationNotFound(place.to_string())),
        }
    }

    /// Look up the stop labels once, near the starting point. Failures leave
    /// the label unresolved.
    async fn resolve_stop_labels(&self, focus: Coordinates) -> HashMap<&'static str, LocationToken> {
        let mut labels = HashMap::new();

        for kind in [StopKind::Fuel, StopKind::Rest] {
            match self.geocoder.geocode(kind.label(), Some(focus)).await {
                Ok(Some(result)) => {
                    labels.insert(kind.label(), LocationToken::Coordinates(result.coordinates));
                }
                Ok(None) => debug!("No match for '{}'", kind.label()),
                Err(e) => warn!("Lookup of '{}' failed: {}", kind.label(), e),
            }
        }

        labels
    }
}
