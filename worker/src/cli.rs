//! CLI argument parsing for the triplog-worker binary.

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "triplog-worker", about = "Truck trip planner with hours-of-service logs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the worker server (default if no subcommand given)
    Serve,
    /// Schedule stops for a known route and print the plan as JSON
    Plan {
        /// Route distance in miles
        #[arg(long)]
        distance_miles: f64,
        /// Routed driving time in hours, including pickup and dropoff
        #[arg(long)]
        duration_hours: f64,
        /// Hours already used in the current cycle
        #[arg(long, default_value_t = 0.0)]
        cycle_used: f64,
        /// Departure clock, e.g. 2026-10-18T08:00:00 (defaults to now)
        #[arg(long)]
        start: Option<NaiveDateTime>,
    },
    /// Geocode, route and schedule a trip and print the plan as JSON
    Trip {
        /// Where the driver is now
        #[arg(long)]
        current: String,
        /// Pickup location
        #[arg(long)]
        pickup: String,
        /// Dropoff location
        #[arg(long)]
        dropoff: String,
        /// Hours already used in the current cycle
        #[arg(long, default_value_t = 0.0)]
        cycle_used: f64,
        /// Departure clock (defaults to now)
        #[arg(long)]
        start: Option<NaiveDateTime>,
    },
}
