use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use wayfinder::{Coord, GeocodeHit, Geocoder, provider::GeocodeError};

use crate::ProviderError;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const RESULT_LIMIT: usize = 5;

/// Forward geocoder backed by a Nominatim instance.
///
/// Nominatim's usage policy requires an identifying user agent, so one is
/// mandatory at construction.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Client against the public `nominatim.openstreetmap.org` instance.
    pub fn new(user_agent: &str) -> Result<Self, ProviderError> {
        Self::with_base_url(user_agent, DEFAULT_BASE_URL)
    }

    /// Client against a self-hosted or regional instance.
    pub fn with_base_url(user_agent: &str, base_url: &str) -> Result<Self, ProviderError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

/// One entry of a Nominatim `/search` response. Coordinates arrive as
/// strings in the JSON payload.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

fn hits_from_places(places: Vec<NominatimPlace>) -> Vec<GeocodeHit> {
    places
        .into_iter()
        .filter_map(|place| {
            let lat = place.lat.parse().ok()?;
            let lon = place.lon.parse().ok()?;
            Some(GeocodeHit {
                coord: Coord::new(lat, lon),
                label: place.display_name,
            })
        })
        .collect()
}

impl Geocoder for NominatimGeocoder {
    #[instrument(name = "Nominatim geocode", level = "debug", skip(self))]
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeHit>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let places: Vec<NominatimPlace> = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", &RESULT_LIMIT.to_string()),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| GeocodeError::Transport(err.to_string()))?
            .json()
            .await
            .map_err(|err| GeocodeError::Transport(err.to_string()))?;

        let hits = hits_from_places(places);
        debug!(query, hits = hits.len(), "Nominatim lookup complete");
        Ok(hits)
    }
}
