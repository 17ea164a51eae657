//! Remote collaborator implementations for the wayfinder core.
//!
//! The shipped campus viewer leaned on two public services: Nominatim for
//! forward geocoding of queries the gazetteer cannot answer, and OSRM for
//! turn-by-turn routes. This crate provides both behind the core's
//! [`Geocoder`](wayfinder::Geocoder) and
//! [`RoutingService`](wayfinder::RoutingService) seams.
//!
//! Both clients are thin: one HTTP round trip per call, first-result
//! semantics left to the core, transport failures mapped to the core's
//! provider error taxonomy.
//!
//! ```rust,no_run
//! use wayfinder_providers::{NominatimGeocoder, OsrmRouter};
//!
//! let geocoder = NominatimGeocoder::new("wayfinder-demo/0.1")?;
//! let router = OsrmRouter::walking()?;
//! # Ok::<(), wayfinder_providers::ProviderError>(())
//! ```

mod nominatim;
mod osrm;

pub use nominatim::NominatimGeocoder;
pub use osrm::OsrmRouter;

use thiserror::Error;

/// Construction-time failures of the provider clients.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
