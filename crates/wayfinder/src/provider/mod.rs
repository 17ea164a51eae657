//! Collaborator seams consumed by the core.
//!
//! The viewer delegates everything with a suspension point or an external
//! surface to a collaborator behind a trait: the map/marker widget, the
//! routing backend, the forward geocoder, the one-shot geolocation provider,
//! durable key-value storage and the toast-style notification surface.
//! Suspending operations are async trait methods; consumers stay generic over
//! the concrete implementation so tests can substitute recording stubs.

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gazetteer::Coord;

/// Opaque reference to a marker owned by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Opaque reference to a route overlay owned by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteHandle(pub u64);

/// Display payload attached to a marker, derived from the resolved candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub description: Option<String>,
    pub facilities: Vec<String>,
    /// Whether the surface should render an "add to favorites" affordance.
    pub offer_favorite: bool,
}

impl Popup {
    /// A popup carrying nothing but a title.
    #[must_use]
    pub fn plain(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            facilities: Vec::new(),
            offer_favorite: false,
        }
    }
}

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// One forward-geocoding result from the external provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    pub coord: Coord,
    pub label: String,
}

/// Route metrics as reported by the routing provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl RouteSummary {
    /// Provider meters divided by 1000; callers format to two decimals.
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    /// Provider seconds to whole minutes, rounded to nearest.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.duration_seconds / 60.0).round() as i64
    }
}

/// The map/marker widget the session draws on.
pub trait MapSurface {
    fn place_marker(&mut self, coord: Coord, popup: Popup) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn draw_route(&mut self, from: Coord, to: Coord) -> RouteHandle;
    fn remove_route(&mut self, handle: RouteHandle);
    fn fly_to(&mut self, coord: Coord, zoom: u8, duration_secs: f64);
    fn show_popup(&mut self, handle: MarkerHandle);
}

/// The turn-by-turn routing backend. At most one request is outstanding per
/// session; the session awaits each to completion before issuing another.
pub trait RoutingService {
    async fn route(&self, from: Coord, to: Coord) -> Result<RouteSummary, RouteError>;
}

/// Forward geocoding of free text against an external provider.
pub trait Geocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeHit>, GeocodeError>;
}

/// One-shot acquisition of the user's position, fired once at startup.
pub trait Locator {
    async fn locate(&self) -> Result<Coord, LocateError>;
}

/// Durable string key-value storage (the browser's local storage in the
/// original deployment).
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Fire-and-forget user-visible notices; no acknowledgement is required.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocoder transport failure: {0}")]
    Transport(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("no route between the requested points")]
    NoRoute,
    #[error("routing transport failure: {0}")]
    Transport(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("position access denied")]
    Denied,
    #[error("position acquisition failed: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
