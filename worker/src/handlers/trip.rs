//! Trip planning handlers

use std::sync::Arc;

use anyhow::Result;
use async_nats::{Client, Subscriber};
use futures::StreamExt;
use serde_json::json;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::PlanError;
use crate::services::trip_planner::TripPlanner;
use crate::types::{ErrorResponse, Request, ScheduleRequest, SuccessResponse, TripPlanRequest};

/// Map a planning failure to the wire error
pub fn plan_error_response(request_id: Uuid, err: &PlanError) -> ErrorResponse {
    let response = ErrorResponse::new(request_id, err.code(), err.to_string());
    match err {
        PlanError::InfeasibleTrip { miles_remaining, cycle_hours_remaining } => response.with_details(json!({
            "milesRemaining": miles_remaining,
            "cycleHoursRemaining": cycle_hours_remaining,
        })),
        PlanError::LocationNotFound(place) => response.with_details(json!({ "location": place })),
        _ => response,
    }
}

/// Handle triplog.trip.plan requests
pub async fn handle_plan(
    client: Client,
    mut subscriber: Subscriber,
    planner: Arc<TripPlanner>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received trip.plan message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let request: Request<TripPlanRequest> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
                continue;
            }
        };

        match planner.plan(&request.payload).await {
            Ok(response) => {
                let success = SuccessResponse::new(request.id, response);
                let _ = client.publish(reply, serde_json::to_vec(&success)?.into()).await;
            }
            Err(e) => {
                warn!("Trip planning failed: {}", e);
                let error = plan_error_response(request.id, &e);
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
            }
        }
    }

    Ok(())
}

/// Handle triplog.trip.schedule requests
pub async fn handle_schedule(
    client: Client,
    mut subscriber: Subscriber,
    planner: Arc<TripPlanner>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received trip.schedule message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let request: Request<ScheduleRequest> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
                continue;
            }
        };

        match planner.schedule(&request.payload) {
            Ok(response) => {
                let success = SuccessResponse::new(request.id, response);
                let _ = client.publish(reply, serde_json::to_vec(&success)?.into()).await;
            }
            Err(e) => {
                warn!("Trip scheduling failed: {}", e);
                let error = plan_error_response(request.id, &e);
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
            }
        }
    }

    Ok(())
}
