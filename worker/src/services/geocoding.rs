//! Geocoding abstraction layer with safety features
//!
//! This module provides a geocoding architecture that:
//! - Uses MockGeocoder for tests and offline development (deterministic, no network)
//! - Uses OpenRouteGeocoder for production (rate limited, circuit breaker)
//!
//! Configuration via GEOCODER_BACKEND env variable:
//! - "mock" → MockGeocoder
//! - "openroute" → OpenRouteGeocoder (requires ORS_API_KEY)

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::services::openroute::OpenRouteClient;
use crate::types::Coordinates;

/// Geocoder trait - abstraction for all geocoding implementations
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocode free text (a place name, or a label such as "fuel stop").
    /// `focus` biases results toward a point when the caller supplies one.
    /// Returns None if nothing matches.
    async fn geocode(&self, query: &str, focus: Option<Coordinates>) -> Result<Option<GeocodingResult>>;

    /// Get the name of this geocoder implementation
    fn name(&self) -> &'static str;
}

/// Result of geocoding operation
#[derive(Debug, Clone)]
pub struct GeocodingResult {
    pub coordinates: Coordinates,
    /// Confidence score 0.0-1.0
    pub confidence: f64,
    pub display_name: String,
}

// ==========================================================================
// MockGeocoder Implementation
// ==========================================================================

/// Mock geocoder for testing - returns deterministic fake coordinates
pub struct MockGeocoder;

impl MockGeocoder {
    pub fn new() -> Self {
        Self
    }

    /// Generate deterministic coordinates from the query hash, inside the
    /// contiguous United States
    fn hash_to_coordinates(query: &str) -> Coordinates {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        query.trim().to_lowercase().hash(&mut hasher);
        let hash = hasher.finish();

        const LAT_MIN: f64 = 30.0;
        const LAT_MAX: f64 = 47.0;
        const LNG_MIN: f64 = -120.0;
        const LNG_MAX: f64 = -75.0;

        let lat_normalized = ((hash >> 32) as f64) / (u32::MAX as f64);
        let lng_normalized = ((hash & 0xFFFFFFFF) as f64) / (u32::MAX as f64);

        Coordinates {
            lat: LAT_MIN + lat_normalized * (LAT_MAX - LAT_MIN),
            lng: LNG_MIN + lng_normalized * (LNG_MAX - LNG_MIN),
        }
    }
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, query: &str, _focus: Option<Coordinates>) -> Result<Option<GeocodingResult>> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(GeocodingResult {
            coordinates: Self::hash_to_coordinates(query),
            confidence: 0.95,
            display_name: query.trim().to_string(),
        }))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// ==========================================================================
// RateLimiter Implementation
// ==========================================================================

/// Rate limiter that enforces minimum interval between calls
pub struct RateLimiter {
    last_call: tokio::sync::Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_call: tokio::sync::Mutex::new(None),
            min_interval,
        }
    }

    /// Wait until it's safe to make another call
    pub async fn wait(&self) {
        let mut last = self.last_call.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                // Hold the lock while sleeping so callers queue up in order.
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }
}

// ==========================================================================
// CircuitBreaker Implementation
// ==========================================================================

/// Circuit breaker to prevent hammering a failing service
pub struct CircuitBreaker {
    failure_count: AtomicU32,
    threshold: u32,
    last_failure: parking_lot::Mutex<Option<Instant>>,
    recovery_time: Duration,
}

impl CircuitBreaker {
    pub fn new(threshold: u32, recovery_time: Duration) -> Self {
        Self {
            failure_count: AtomicU32::new(0),
            threshold,
            last_failure: parking_lot::Mutex::new(None),
            recovery_time,
        }
    }

    /// Check if circuit is open (blocking calls)
    pub fn is_open(&self) -> bool {
        if self.failure_count.load(Ordering::Relaxed) < self.threshold {
            return false;
        }
        match *self.last_failure.lock() {
            // Half-open: allow a retry once the recovery time has passed
            Some(last_time) => last_time.elapsed() < self.recovery_time,
            None => true,
        }
    }

    pub fn record_failure(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        *self.last_failure.lock() = Some(Instant::now());
    }

    /// Record a success (resets failure count)
    pub fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
    }
}

// ==========================================================================
// OpenRouteGeocoder Implementation
// ==========================================================================

/// Default rate limit interval (ORS free tier allows 100 geocode requests/minute)
pub const DEFAULT_RATE_LIMIT_MS: u64 = 700;

/// Default circuit breaker threshold (3 failures)
pub const DEFAULT_CIRCUIT_BREAKER_THRESHOLD: u32 = 3;

/// Default circuit breaker recovery time (5 minutes)
pub const DEFAULT_CIRCUIT_BREAKER_RECOVERY_SECS: u64 = 300;

/// Rate-limited OpenRouteService geocoder with circuit breaker protection
pub struct OpenRouteGeocoder {
    client: OpenRouteClient,
    rate_limiter: RateLimiter,
    pub(crate) circuit_breaker: CircuitBreaker,
}

impl OpenRouteGeocoder {
    pub fn new(
        client: OpenRouteClient,
        rate_limit_interval: Duration,
        circuit_breaker_threshold: u32,
        circuit_breaker_recovery: Duration,
    ) -> Self {
        Self {
            client,
            rate_limiter: RateLimiter::new(rate_limit_interval),
            circuit_breaker: CircuitBreaker::new(circuit_breaker_threshold, circuit_breaker_recovery),
        }
    }

    pub fn from_config(config: &Config, api_key: &str) -> Result<Self> {
        let client = OpenRouteClient::new(&config.ors_base_url, api_key, config.ors_timeout)?;
        Ok(Self::new(
            client,
            config.ors_rate_limit,
            config.ors_cb_threshold,
            config.ors_cb_recovery,
        ))
    }
}

#[async_trait]
impl Geocoder for OpenRouteGeocoder {
    async fn geocode(&self, query: &str, focus: Option<Coordinates>) -> Result<Option<GeocodingResult>> {
        if self.circuit_breaker.is_open() {
            tracing::warn!("Circuit breaker is open, rejecting geocoding request");
            anyhow::bail!("Geocoding service temporarily unavailable (circuit breaker open)");
        }

        self.rate_limiter.wait().await;

        match self.client.geocode(query, focus).await {
            Ok(Some(place)) => {
                self.circuit_breaker.record_success();
                Ok(Some(GeocodingResult {
                    coordinates: place.coordinates,
                    confidence: 0.8,
                    display_name: place.label.unwrap_or_else(|| query.to_string()),
                }))
            }
            Ok(None) => {
                // No result found is not a failure
                self.circuit_breaker.record_success();
                Ok(None)
            }
            Err(e) => {
                self.circuit_breaker.record_failure();
                tracing::error!("Geocoding failed: {}", e);
                Err(e)
            }
        }
    }

    fn name(&self) -> &'static str {
        "openroute"
    }
}

// ==========================================================================
// Factory function
// ==========================================================================

/// Create geocoder based on `config.geocoder_backend`
///
/// Falls back to the mock geocoder when the OpenRouteService backend is
/// requested without an API key or its client cannot be built.
pub fn create_geocoder(config: &Config) -> Box<dyn Geocoder> {
    match config.geocoder_backend.as_str() {
        "mock" => {
            tracing::info!("Using MockGeocoder");
            Box::new(MockGeocoder::new())
        }
        "openroute" => match config.ors_api_key.as_deref() {
            Some(key) => match OpenRouteGeocoder::from_config(config, key) {
                Ok(geocoder) => {
                    tracing::info!("Using OpenRouteGeocoder at {}", config.ors_base_url);
                    Box::new(geocoder)
                }
                Err(e) => {
                    tracing::warn!("Failed to create OpenRouteGeocoder: {}, using mock", e);
                    Box::new(MockGeocoder::new())
                }
            },
            None => {
                tracing::warn!("GEOCODER_BACKEND=openroute but ORS_API_KEY is not set, using mock");
                Box::new(MockGeocoder::new())
            }
        },
        other => {
            tracing::warn!("Unknown GEOCODER_BACKEND '{}', using mock", other);
            Box::new(MockGeocoder::new())
        }
    }
}
