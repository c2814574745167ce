//! Routing service for trip distance/duration
//!
//! Uses OpenRouteService (heavy-goods-vehicle profile) for production, mock for tests.

mod openroute;

pub use openroute::OpenRouteRoutingService;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::defaults::{AVERAGE_SPEED_MPH, METERS_PER_MILE};
use crate::services::geo::{road_distance_along, ROAD_COEFFICIENT};
use crate::types::{Coordinates, RouteLeg};

/// Routing service trait for abstraction (OpenRouteService, mock, etc.)
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Total distance and duration of a route through the waypoints, in order
    async fn route(&self, waypoints: &[Coordinates]) -> Result<RouteLeg>;

    /// Get service name for logging
    fn name(&self) -> &str;
}

/// Mock routing service for tests
/// Uses Haversine distance × coefficient for estimation
pub struct MockRoutingService {
    /// Coefficient for converting straight-line to road distance (default: 1.2)
    road_coefficient: f64,
    /// Average speed in mph for time estimation (default: 55)
    average_speed_mph: f64,
}

impl Default for MockRoutingService {
    fn default() -> Self {
        Self {
            road_coefficient: ROAD_COEFFICIENT,
            average_speed_mph: AVERAGE_SPEED_MPH,
        }
    }
}

impl MockRoutingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(road_coefficient: f64, average_speed_mph: f64) -> Self {
        Self {
            road_coefficient,
            average_speed_mph,
        }
    }
}

#[async_trait]
impl RoutingService for MockRoutingService {
    async fn route(&self, waypoints: &[Coordinates]) -> Result<RouteLeg> {
        if waypoints.len() < 2 {
            anyhow::bail!("A route needs at least two waypoints (got {})", waypoints.len());
        }

        let distance_meters = road_distance_along(waypoints, self.road_coefficient) * 1000.0;
        let miles = distance_meters / METERS_PER_MILE;

        Ok(RouteLeg {
            distance_meters,
            duration_seconds: miles / self.average_speed_mph * 3600.0,
        })
    }

    fn name(&self) -> &str {
        "MockRouting"
    }
}

/// Create routing service based on configuration
///
/// OpenRouteService is used whenever an API key is configured, otherwise
/// the mock estimates distances from straight lines.
pub fn create_routing_service(config: &Config) -> Box<dyn RoutingService> {
    use tracing::{info, warn};

    if let Some(key) = config.ors_api_key.as_deref() {
        match OpenRouteRoutingService::new(&config.ors_base_url, key, config.ors_timeout) {
            Ok(service) => {
                info!("OpenRouteService routing at {}", config.ors_base_url);
                return Box::new(service);
            }
            Err(e) => {
                warn!("Failed to create OpenRouteService routing: {}. Falling back to mock routing.", e);
            }
        }
    }

    info!("Using mock routing service (ORS_API_KEY not configured)");
    Box::new(MockRoutingService::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicago() -> Coordinates {
        Coordinates { lat: 41.8781, lng: -87.6298 }
    }

    fn st_louis() -> Coordinates {
        Coordinates { lat: 38.6270, lng: -90.1994 }
    }

    fn indianapolis() -> Coordinates {
        Coordinates { lat: 39.7684, lng: -86.1581 }
    }

    #[tokio::test]
    async fn test_mock_routing_needs_two_waypoints() {
        let service = MockRoutingService::new();
        assert!(service.route(&[]).await.is_err());
        assert!(service.route(&[chicago()]).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_routing_two_waypoints() {
        let service = MockRoutingService::new();
        let leg = service.route(&[chicago(), st_louis()]).await.unwrap();

        // Chicago to St. Louis is ~420 km straight line, ~505 km road
        let distance_km = leg.distance_meters / 1000.0;
        assert!(distance_km > 480.0 && distance_km < 530.0,
            "Expected ~505 km, got {} km", distance_km);
    }

    #[tokio::test]
    async fn test_mock_routing_travel_time_reasonable() {
        let service = MockRoutingService::new();
        let leg = service.route(&[chicago(), st_louis()]).await.unwrap();

        // ~314 miles at 55 mph = ~5.7 hours
        let duration_hours = leg.duration_seconds / 3600.0;
        assert!(duration_hours > 5.0 && duration_hours < 6.5,
            "Expected ~5.7 hours, got {} hours", duration_hours);
    }

    #[tokio::test]
    async fn test_mock_routing_sums_legs_in_order() {
        let service = MockRoutingService::new();
        let first = service.route(&[chicago(), indianapolis()]).await.unwrap();
        let second = service.route(&[indianapolis(), st_louis()]).await.unwrap();
        let whole = service.route(&[chicago(), indianapolis(), st_louis()]).await.unwrap();

        assert!((whole.distance_meters - first.distance_meters - second.distance_meters).abs() < 1e-6);
        assert!((whole.duration_seconds - first.duration_seconds - second.duration_seconds).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_mock_routing_custom_params() {
        let service = MockRoutingService::with_params(1.5, 50.0);
        let leg = service.route(&[chicago(), st_louis()]).await.unwrap();

        let distance_km = leg.distance_meters / 1000.0;
        assert!(distance_km > 600.0 && distance_km < 660.0,
            "Expected ~630 km with 1.5 coefficient, got {} km", distance_km);
    }

    #[test]
    fn test_routing_service_name() {
        let mock = MockRoutingService::new();
        assert_eq!(mock.name(), "MockRouting");
    }

    #[test]
    fn test_create_routing_service_without_key_is_mock() {
        let service = create_routing_service(&Config::default());
        assert_eq!(service.name(), "MockRouting");
    }

    #[test]
    fn test_create_routing_service_with_key_is_openroute() {
        let config = Config {
            ors_api_key: Some("key".to_string()),
            ..Config::default()
        };
        let service = create_routing_service(&config);
        assert_eq!(service.name(), "OpenRouteService");
    }
}
