use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use wayfinder::{Coord, RouteSummary, RoutingService, provider::RouteError};

use crate::ProviderError;

const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Routing client for an OSRM `route/v1` endpoint.
#[derive(Debug, Clone)]
pub struct OsrmRouter {
    client: Client,
    base_url: String,
    profile: String,
}

impl OsrmRouter {
    /// Client for the public OSRM demo server with the given profile
    /// (`"foot"`, `"driving"`, ...).
    pub fn new(profile: &str) -> Result<Self, ProviderError> {
        Self::with_base_url(profile, DEFAULT_BASE_URL)
    }

    /// Walking-profile client for the public demo server, the campus
    /// default.
    pub fn walking() -> Result<Self, ProviderError> {
        Self::new("foot")
    }

    /// Client for a self-hosted OSRM instance.
    pub fn with_base_url(profile: &str, base_url: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            profile: profile.to_owned(),
        })
    }
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

fn summary_from_response(response: OsrmResponse) -> Result<RouteSummary, RouteError> {
    if response.code != "Ok" {
        return Err(RouteError::NoRoute);
    }
    response
        .routes
        .into_iter()
        .next()
        .map(|route| RouteSummary {
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
        .ok_or(RouteError::NoRoute)
}

impl RoutingService for OsrmRouter {
    #[instrument(name = "OSRM route", level = "debug", skip_all)]
    async fn route(&self, from: Coord, to: Coord) -> Result<RouteSummary, RouteError> {
        // OSRM takes lon,lat pairs
        let url = format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url, self.profile, from.lon, from.lat, to.lon, to.lat
        );
        let response: OsrmResponse = self
            .client
            .get(&url)
            .query(&[("overview", "false")])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| RouteError::Transport(err.to_string()))?
            .json()
            .await
            .map_err(|err| RouteError::Transport(err.to_string()))?;

        let summary = summary_from_response(response)?;
        debug!(
            distance_meters = summary.distance_meters,
            duration_seconds = summary.duration_seconds,
            "OSRM route computed"
        );
        Ok(summary)
    }
}
