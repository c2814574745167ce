//! NATS message handlers

pub mod ping;
pub mod trip;

use std::sync::Arc;

use anyhow::Result;
use async_nats::Client;
use tokio::select;
use tracing::{error, info};

use crate::config::Config;
use crate::services::geocoding::{create_geocoder, Geocoder};
use crate::services::routing::{create_routing_service, RoutingService};
use crate::services::trip_planner::TripPlanner;

pub const SUBJECT_PING: &str = "triplog.ping";
pub const SUBJECT_TRIP_PLAN: &str = "triplog.trip.plan";
pub const SUBJECT_TRIP_SCHEDULE: &str = "triplog.trip.schedule";

/// Start all message handlers
pub async fn start_handlers(client: Client, config: &Config) -> Result<()> {
    info!("Starting message handlers...");

    // Create shared geocoder
    let geocoder: Arc<dyn Geocoder> = Arc::from(create_geocoder(config));
    info!("Geocoder initialized: {}", geocoder.name());

    let routing_service: Arc<dyn RoutingService> = Arc::from(create_routing_service(config));
    info!("Routing service initialized: {}", routing_service.name());

    let backends = ping::Backends {
        geocoder: geocoder.name().to_string(),
        routing: routing_service.name().to_string(),
    };
    let planner = Arc::new(TripPlanner::new(geocoder, routing_service, config.hos_rules));

    // Subscribe to all subjects
    let ping_sub = client.subscribe(SUBJECT_PING).await?;
    let trip_plan_sub = client.subscribe(SUBJECT_TRIP_PLAN).await?;
    let trip_schedule_sub = client.subscribe(SUBJECT_TRIP_SCHEDULE).await?;

    info!("Subscribed to NATS subjects: {}, {}, {}", SUBJECT_PING, SUBJECT_TRIP_PLAN, SUBJECT_TRIP_SCHEDULE);

    let client_ping = client.clone();
    let client_trip_plan = client.clone();
    let client_trip_schedule = client.clone();

    let planner_plan = Arc::clone(&planner);
    let planner_schedule = Arc::clone(&planner);

    let ping_handle = tokio::spawn(async move {
        ping::handle_ping(client_ping, ping_sub, backends).await
    });

    let trip_plan_handle = tokio::spawn(async move {
        trip::handle_plan(client_trip_plan, trip_plan_sub, planner_plan).await
    });

    let trip_schedule_handle = tokio::spawn(async move {
        trip::handle_schedule(client_trip_schedule, trip_schedule_sub, planner_schedule).await
    });

    info!("All handlers started, waiting for messages...");

    // Wait for any handler to finish (which would indicate an error)
    select! {
        result = ping_handle => {
            error!("Ping handler finished: {:?}", result);
        }
        result = trip_plan_handle => {
            error!("Trip plan handler finished: {:?}", result);
        }
        result = trip_schedule_handle => {
            error!("Trip schedule handler finished: {:?}", result);
        }
    }

    Ok(())
}
