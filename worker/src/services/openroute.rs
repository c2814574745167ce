//! OpenRouteService client (geocoding and heavy-goods-vehicle directions)
//!
//! API documentation:
//! https://openrouteservice.org/dev/#/api-docs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Coordinates, RouteLeg};

pub const DEFAULT_ORS_BASE_URL: &str = "https://api.openrouteservice.org";

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeFeature {
    pub geometry: FeatureGeometry,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
pub struct FeatureGeometry {
    /// [longitude, latitude]
    pub coordinates: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
struct DirectionsRequest {
    /// [longitude, latitude] pairs
    coordinates: Vec<[f64; 2]>,
    instructions: bool,
    preference: &'static str,
    geometry: bool,
    elevation: bool,
    units: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub summary: RouteSummaryBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteSummaryBody {
    /// Meters
    #[serde(default)]
    pub distance: f64,
    /// Seconds
    #[serde(default)]
    pub duration: f64,
}

impl DirectionsResponse {
    /// Sum distance and duration over all returned routes.
    pub fn total(&self) -> RouteLeg {
        self.routes.iter().fold(
            RouteLeg { distance_meters: 0.0, duration_seconds: 0.0 },
            |acc, route| RouteLeg {
                distance_meters: acc.distance_meters + route.summary.distance,
                duration_seconds: acc.duration_seconds + route.summary.duration,
            },
        )
    }
}

/// A geocoded place
#[derive(Debug, Clone)]
pub struct OrsPlace {
    pub coordinates: Coordinates,
    pub label: Option<String>,
}

/// OpenRouteService HTTP client
pub struct OpenRouteClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenRouteClient {
    /// Create a new client
    pub fn new(base_url: &str, api_key: &str, timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Triplog/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    /// Build the geocode search URL.
    ///
    /// The focus point is sent whenever the caller supplied one, including
    /// coordinates on the equator or prime meridian.
    pub fn search_url(&self, text: &str, focus: Option<Coordinates>) -> String {
        let mut url = format!(
            "{}/geocode/search?api_key={}&text={}&size=1",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(text)
        );
        if let Some(point) = focus {
            url.push_str(&format!("&focus.point.lon={}&focus.point.lat={}", point.lng, point.lat));
        }
        url
    }

    /// Geocode free text to the best matching place
    pub async fn geocode(&self, text: &str, focus: Option<Coordinates>) -> Result<Option<OrsPlace>> {
        let url = self.search_url(text, focus);

        let response = self.client
            .get(&url)
            .send()
            .await
            .context("Failed to send geocoding request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenRouteService geocode returned error {}: {}", status, body);
        }

        let result: GeocodeResponse = response
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        Ok(result.features.into_iter().next().map(|feature| OrsPlace {
            coordinates: Coordinates {
                lat: feature.geometry.coordinates[1],
                lng: feature.geometry.coordinates[0],
            },
            label: feature.properties.label,
        }))
    }

    /// Heavy-goods-vehicle route through the waypoints, in order
    pub async fn directions(&self, waypoints: &[Coordinates]) -> Result<RouteLeg> {
        let request = DirectionsRequest {
            coordinates: waypoints.iter().map(|c| [c.lng, c.lat]).collect(),
            instructions: false,
            preference: "recommended",
            geometry: false,
            elevation: false,
            units: "m",
        };
        let url = format!("{}/v2/directions/driving-hgv", self.base_url);

        debug!("Requesting HGV directions for {} waypoints", waypoints.len());

        let response = self.client
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send directions request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenRouteService directions returned error {}: {}", status, body);
        }

        let result: DirectionsResponse = response
            .json()
            .await
            .context("Failed to parse directions response")?;

        if result.routes.is_empty() {
            anyhow::bail!("OpenRouteService returned no routes");
        }

        Ok(result.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenRouteClient {
        OpenRouteClient::new(DEFAULT_ORS_BASE_URL, "key", std::time::Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn search_url_encodes_text_without_focus() {
        let url = client().search_url("fuel stop", None);
        assert_eq!(
            url,
            "https://api.openrouteservice.org/geocode/search?api_key=key&text=fuel%20stop&size=1"
        );
    }

    #[test]
    fn search_url_keeps_zero_focus_coordinates() {
        let url = client().search_url("rest stop", Some(Coordinates { lat: 0.0, lng: 0.0 }));
        assert!(url.ends_with("&focus.point.lon=0&focus.point.lat=0"), "{}", url);
    }

    #[test]
    fn directions_totals_sum_routes() {
        let body = r#"{"routes": [
            {"summary": {"distance": 1000.0, "duration": 60.0}},
            {"summary": {"distance": 500.5, "duration": 30.0}}
        ]}"#;
        let response: DirectionsResponse = serde_json::from_str(body).unwrap();
        let total = response.total();
        assert_eq!(total.distance_meters, 1500.5);
        assert_eq!(total.duration_seconds, 90.0);
    }

    #[test]
    fn geocode_feature_parses_lon_lat_order() {
        let body = r#"{"features": [{"geometry": {"coordinates": [-87.63, 41.88]},
                       "properties": {"label": "Chicago, IL, USA"}}]}"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        let feature = &response.features[0];
        assert_eq!(feature.geometry.coordinates, [-87.63, 41.88]);
        assert_eq!(feature.properties.label.as_deref(), Some("Chicago, IL, USA"));
    }

    #[tokio::test]
    #[ignore = "Requires ORS_API_KEY and network access"]
    async fn test_geocode_chicago() {
        let key = std::env::var("ORS_API_KEY").unwrap();
        let client = OpenRouteClient::new(DEFAULT_ORS_BASE_URL, &key, std::time::Duration::from_secs(30)).unwrap();

        let place = client.geocode("Chicago, IL", None).await.unwrap().unwrap();

        assert!((place.coordinates.lat - 41.88).abs() < 0.5);
        assert!((place.coordinates.lng + 87.63).abs() < 0.5);
    }
}
