use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::Route;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Baseline routing data for one route, valid for a single collection cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteInfo {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Per-route fetch failure. All variants are non-fatal for the cycle; the
/// orchestrator drops the route and moves on.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    #[error("routing request timed out")]
    Timeout,
    #[error("routing service unreachable or returned an error status")]
    Unreachable,
    #[error("routing service found no route for the coordinate pair")]
    NoRouteFound,
}

/// Boundary to the external routing service. The orchestrator only sees this
/// trait, so tests can substitute a scripted gate.
#[async_trait]
pub trait RouteInfoGate: Send + Sync {
    async fn fetch(&self, route: &Route) -> Result<RouteInfo, GateError>;
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
}

/// Production gate against an OSRM `route` endpoint.
pub struct OsrmGate {
    client: reqwest::Client,
    base_url: String,
}

impl OsrmGate {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to construct http client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn route_url(&self, route: &Route) -> String {
        let (from_lon, from_lat) = route.origin;
        let (to_lon, to_lat) = route.destination;
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=false",
            self.base_url, from_lon, from_lat, to_lon, to_lat
        )
    }
}

impl Default for OsrmGate {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl RouteInfoGate for OsrmGate {
    /// One request, no retries. Retry policy is the caller's concern.
    async fn fetch(&self, route: &Route) -> Result<RouteInfo, GateError> {
        let response = self
            .client
            .get(self.route_url(route))
            .send()
            .await
            .map_err(|err| if err.is_timeout() { GateError::Timeout } else { GateError::Unreachable })?;

        if !response.status().is_success() {
            return Err(GateError::Unreachable);
        }

        let body: OsrmResponse = response.json().await.map_err(|_| GateError::NoRouteFound)?;

        if body.code != "Ok" {
            return Err(GateError::NoRouteFound);
        }

        // first candidate wins, alternatives are not requested
        body.routes
            .first()
            .map(|r| RouteInfo {
                distance_meters: r.distance,
                duration_seconds: r.duration,
            })
            .ok_or(GateError::NoRouteFound)
    }
}
