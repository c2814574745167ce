//! Planning error type.

use thiserror::Error;

/// Errors surfaced to the caller of the trip planner.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "trip is infeasible: cycle budget exhausted with {miles_remaining:.1} miles remaining \
         ({cycle_hours_remaining:.2} cycle hours left)"
    )]
    InfeasibleTrip {
        miles_remaining: f64,
        cycle_hours_remaining: f64,
    },

    #[error("no coordinates found for location: {0}")]
    LocationNotFound(String),

    #[error(transparent)]
    Service(#[from] anyhow::Error),
}

impl PlanError {
    /// Stable code reported in `ErrorResponse`.
    pub const fn code(&self) -> &'static str {
        match self {
            PlanError::InvalidInput(_) => "INVALID_INPUT",
            PlanError::InfeasibleTrip { .. } => "INFEASIBLE_TRIP",
            PlanError::LocationNotFound(_) => "LOCATION_NOT_FOUND",
            PlanError::Service(_) => "SERVICE_ERROR",
        }
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
