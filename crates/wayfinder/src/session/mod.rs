//! The single live marker+route pairing shown on the map.
//!
//! At most one session is active per process. `activate` always completes a
//! `clear` before drawing anything, so stale overlays can never stack up; the
//! exclusive borrow on the session makes overlapping activations
//! unrepresentable. A route failure after the marker is placed leaves the
//! marker visible: partial success is shown, not hidden.

use tracing::{debug, instrument, warn};

pub use error::SessionError;
use error::Result;

use crate::{
    config::SessionConfig,
    gazetteer::Coord,
    provider::{
        MapSurface, MarkerHandle, Notifier, RouteHandle, RouteSummary, RoutingService, Severity,
    },
    resolve::Candidate,
};

/// How an activation's routing leg ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteOutcome {
    /// The provider returned a route; its summary was surfaced.
    Routed(RouteSummary),
    /// The provider failed; the destination marker stays in place.
    Failed,
}

/// Owns the currently highlighted destination: one optional marker and one
/// optional route overlay, released together on `clear`.
#[derive(Debug, Default)]
pub struct NavigationSession {
    config: SessionConfig,
    marker: Option<MarkerHandle>,
    route: Option<RouteHandle>,
}

impl NavigationSession {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            marker: None,
            route: None,
        }
    }

    /// Replace the active destination with `candidate`.
    ///
    /// Requires the user's position (`from`) to be resolved; fails with
    /// [`SessionError::LocationUnavailable`] before any surface call
    /// otherwise. The previous marker and overlay are released first, then
    /// the map flies to the candidate, the marker and popup go up, and the
    /// routing collaborator is awaited. Routing failure is reported through
    /// the notifier and the outcome, never as an `Err`.
    #[instrument(name = "Activate navigation session", level = "debug", skip_all)]
    pub async fn activate<M, R, N>(
        &mut self,
        surface: &mut M,
        router: &R,
        notifier: &N,
        candidate: &Candidate,
        from: Option<Coord>,
    ) -> Result<RouteOutcome>
    where
        M: MapSurface,
        R: RoutingService,
        N: Notifier,
    {
        let Some(from) = from else {
            return Err(SessionError::LocationUnavailable);
        };

        self.clear(surface);

        let destination = candidate.coord();
        let zoom = if candidate.is_geocoded() {
            self.config.geocoded_zoom
        } else {
            self.config.gazetteer_zoom
        };
        surface.fly_to(destination, zoom, self.config.fly_duration_secs);

        let marker = surface.place_marker(destination, candidate.popup());
        surface.show_popup(marker);
        self.marker = Some(marker);
        debug!(name = candidate.display_name(), "Destination marker placed");

        match router.route(from, destination).await {
            Ok(summary) => {
                self.route = Some(surface.draw_route(from, destination));
                notifier.notify(
                    &format!(
                        "Route found: {:.2} km, ~{} minutes",
                        summary.distance_km(),
                        summary.duration_minutes()
                    ),
                    Severity::Success,
                );
                Ok(RouteOutcome::Routed(summary))
            }
            Err(err) => {
                warn!(error = %err, "Routing provider failed; keeping marker");
                notifier.notify("Could not find route. Please try again.", Severity::Error);
                Ok(RouteOutcome::Failed)
            }
        }
    }

    /// Release the route overlay, then the marker. Idempotent: safe when
    /// either or both are already absent.
    pub fn clear<M: MapSurface>(&mut self, surface: &mut M) {
        if let Some(route) = self.route.take() {
            surface.remove_route(route);
        }
        if let Some(marker) = self.marker.take() {
            surface.remove_marker(marker);
        }
    }

    /// Handle of the live destination marker, if any.
    #[must_use]
    pub fn marker(&self) -> Option<MarkerHandle> {
        self.marker
    }

    /// Handle of the live route overlay, if any.
    #[must_use]
    pub fn route(&self) -> Option<RouteHandle> {
        self.route
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum SessionError {
        #[error("user location has not been resolved yet")]
        LocationUnavailable,
    }
    pub type Result<T> = std::result::Result<T, SessionError>;
}
