//! Configuration management

use std::str::FromStr;
use std::time::Duration;

use anyhow::{self, Context, Result};

use crate::services::geocoding::{
    DEFAULT_CIRCUIT_BREAKER_RECOVERY_SECS, DEFAULT_CIRCUIT_BREAKER_THRESHOLD, DEFAULT_RATE_LIMIT_MS,
};
use crate::services::openroute::DEFAULT_ORS_BASE_URL;
use crate::types::HosRules;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// NATS server URL
    pub nats_url: String,

    /// OpenRouteService base URL (geocoding and directions)
    pub ors_base_url: String,

    /// OpenRouteService API key (optional, falls back to mocks if missing)
    pub ors_api_key: Option<String>,

    /// "mock" or "openroute"
    pub geocoder_backend: String,

    /// Minimum interval between geocoding calls
    pub ors_rate_limit: Duration,

    /// Consecutive failures before the geocoder circuit opens
    pub ors_cb_threshold: u32,

    /// How long the circuit stays open
    pub ors_cb_recovery: Duration,

    /// HTTP timeout for OpenRouteService calls
    pub ors_timeout: Duration,

    /// Hours-of-service rules used by the scheduler
    pub hos_rules: HosRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nats_url: "nats://localhost:4222".to_string(),
            ors_base_url: DEFAULT_ORS_BASE_URL.to_string(),
            ors_api_key: None,
            geocoder_backend: "mock".to_string(),
            ors_rate_limit: Duration::from_millis(DEFAULT_RATE_LIMIT_MS),
            ors_cb_threshold: DEFAULT_CIRCUIT_BREAKER_THRESHOLD,
            ors_cb_recovery: Duration::from_secs(DEFAULT_CIRCUIT_BREAKER_RECOVERY_SECS),
            ors_timeout: Duration::from_secs(30),
            hos_rules: HosRules::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let nats_url = lookup("NATS_URL").unwrap_or(defaults.nats_url);

        let ors_base_url = lookup("ORS_BASE_URL").unwrap_or(defaults.ors_base_url);

        let ors_api_key = lookup("ORS_API_KEY").filter(|key| !key.trim().is_empty());

        let geocoder_backend = lookup("GEOCODER_BACKEND")
            .map(|backend| backend.trim().to_lowercase())
            .unwrap_or(defaults.geocoder_backend);
        if !matches!(geocoder_backend.as_str(), "mock" | "openroute") {
            anyhow::bail!("GEOCODER_BACKEND must be 'mock' or 'openroute' (got '{}')", geocoder_backend);
        }

        let ors_rate_limit = Duration::from_millis(parse(&lookup, "ORS_RATE_LIMIT_MS", DEFAULT_RATE_LIMIT_MS)?);
        let ors_cb_threshold = parse(&lookup, "ORS_CB_THRESHOLD", DEFAULT_CIRCUIT_BREAKER_THRESHOLD)?;
        let ors_cb_recovery =
            Duration::from_secs(parse(&lookup, "ORS_CB_RECOVERY_SECS", DEFAULT_CIRCUIT_BREAKER_RECOVERY_SECS)?);
        let ors_timeout = Duration::from_secs(parse(&lookup, "ORS_TIMEOUT_SECS", 30u64)?);

        let base = defaults.hos_rules;
        let hos_rules = HosRules {
            max_daily_driving_hours: parse(&lookup, "HOS_MAX_DAILY_DRIVING_HOURS", base.max_daily_driving_hours)?,
            max_daily_duty_hours: parse(&lookup, "HOS_MAX_DAILY_DUTY_HOURS", base.max_daily_duty_hours)?,
            min_rest_hours: parse(&lookup, "HOS_MIN_REST_HOURS", base.min_rest_hours)?,
            max_cycle_hours: parse(&lookup, "HOS_MAX_CYCLE_HOURS", base.max_cycle_hours)?,
            fuel_distance_miles: parse(&lookup, "HOS_FUEL_DISTANCE_MILES", base.fuel_distance_miles)?,
            pickup_dropoff_hours: parse(&lookup, "HOS_PICKUP_DROPOFF_HOURS", base.pickup_dropoff_hours)?,
            average_speed_mph: parse(&lookup, "HOS_AVERAGE_SPEED_MPH", base.average_speed_mph)?,
            fuel_stop_hours: parse(&lookup, "HOS_FUEL_STOP_HOURS", base.fuel_stop_hours)?,
            pre_trip_inspection_hours: parse(
                &lookup,
                "HOS_PRE_TRIP_INSPECTION_HOURS",
                base.pre_trip_inspection_hours,
            )?,
        };
        if let Some(field) = hos_rules.first_invalid() {
            anyhow::bail!("Invalid hours-of-service rule: {} must be a positive number", field);
        }

        Ok(Self {
            nats_url,
            ors_base_url,
            ors_api_key,
            geocoder_backend,
            ors_rate_limit,
            ors_cb_threshold,
            ors_cb_recovery,
            ors_timeout,
            hos_rules,
        })
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", key, raw)),
        None => Ok(default),
    }
}
