//! OpenRouteService directions as a RoutingService

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::RoutingService;
use crate::services::openroute::OpenRouteClient;
use crate::types::{Coordinates, RouteLeg};

/// Heavy-goods-vehicle routing via OpenRouteService
pub struct OpenRouteRoutingService {
    client: OpenRouteClient,
}

impl OpenRouteRoutingService {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: OpenRouteClient::new(base_url, api_key, timeout)?,
        })
    }
}

#[async_trait]
impl RoutingService for OpenRouteRoutingService {
    async fn route(&self, waypoints: &[Coordinates]) -> Result<RouteLeg> {
        if waypoints.len() < 2 {
            anyhow::bail!("A route needs at least two waypoints (got {})", waypoints.len());
        }

        let leg = self.client.directions(waypoints).await?;
        debug!(
            "OpenRouteService route: {:.0} m, {:.0} s over {} waypoints",
            leg.distance_meters,
            leg.duration_seconds,
            waypoints.len()
        );
        Ok(leg)
    }

    fn name(&self) -> &str {
        "OpenRouteService"
    }
}
