//! Triplog Worker - truck trip planning with hours-of-service logs
//!
//! Serves trip planning over NATS, or plans a single trip from the command line.

mod cli;
mod config;
mod defaults;
mod error;
mod handlers;
mod services;
mod types;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::cli::{Cli, Command};
use crate::services::geocoding::create_geocoder;
use crate::services::routing::create_routing_service;
use crate::services::trip_planner::TripPlanner;
use crate::types::{ScheduleRequest, TripPlanRequest, TripPlanResponse};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ../logs (relative to worker)
    let logs_dir = std::env::var("LOGS_DIR")
        .unwrap_or_else(|_| "../logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &logs_dir,
        "worker.log",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - stderr (stdout carries CLI output) and file
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,triplog_worker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))  // file
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::from_env()?;
    info!("Configuration loaded");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Plan { distance_miles, duration_hours, cycle_used, start } => {
            let planner = planner(&config);
            let response = planner.schedule(&ScheduleRequest {
                distance_miles,
                duration_hours,
                current_cycle_used: cycle_used,
                departure_time: start,
            })?;
            print_response(&response)
        }
        Command::Trip { current, pickup, dropoff, cycle_used, start } => {
            let planner = planner(&config);
            let response = planner
                .plan(&TripPlanRequest {
                    current_location: current,
                    pickup_location: pickup,
                    dropoff_location: dropoff,
                    current_cycle_used: cycle_used,
                    departure_time: start,
                })
                .await?;
            print_response(&response)
        }
    }
}

async fn serve(config: config::Config) -> Result<()> {
    info!("Starting Triplog Worker...");

    // Connect to NATS (supports optional NATS_USER/NATS_PASSWORD auth).
    let nats_client = match (std::env::var("NATS_USER"), std::env::var("NATS_PASSWORD")) {
        (Ok(user), Ok(password)) if !user.is_empty() => {
            async_nats::ConnectOptions::new()
                .user_and_password(user, password)
                .connect(&config.nats_url)
                .await?
        }
        _ => async_nats::connect(&config.nats_url).await?,
    };
    info!("Connected to NATS at {}", config.nats_url);

    // Start message handlers
    let handler_result = handlers::start_handlers(nats_client, &config).await;

    if let Err(e) = handler_result {
        error!("Handler error: {}", e);
        return Err(e);
    }

    Ok(())
}

fn planner(config: &config::Config) -> TripPlanner {
    TripPlanner::new(
        Arc::from(create_geocoder(config)),
        Arc::from(create_routing_service(config)),
        config.hos_rules,
    )
}

fn print_response(response: &TripPlanResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
