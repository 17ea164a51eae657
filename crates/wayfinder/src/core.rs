//! The top-level wayfinding facade.
//!
//! A [`Wayfinder`] owns the gazetteer, the profile store, the navigation
//! session and every collaborator, constructed once at startup and threaded
//! through each operation. Each navigation request fully completes (success
//! or failure) before the next may begin: `navigate` takes `&mut self` and
//! awaits its suspension points in sequence, so there is never more than one
//! outstanding geocode or route request.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use wayfinder::{Gazetteer, Wayfinder, WayfinderConfig};
//!
//! let mut app = Wayfinder::new(
//!     Gazetteer::campus(),
//!     storage,
//!     surface,
//!     router,
//!     geocoder,
//!     locator,
//!     notifier,
//!     WayfinderConfig::default(),
//! )?;
//! app.start().await;
//! let outcome = app.navigate("Canteen").await?;
//! ```

use tracing::{info, instrument, warn};

use crate::{
    config::WayfinderConfig,
    error::{Result, WayfinderError},
    gazetteer::Gazetteer,
    provider::{
        Geocoder, Locator, MapSurface, Notifier, Popup, RouteSummary, RoutingService, Severity,
        StorageBackend,
    },
    resolve::PlaceResolver,
    session::{NavigationSession, RouteOutcome, SessionError},
    store::{FavoriteOutcome, ProfileStore},
    suggest::SuggestionRanker,
    theme::MapTheme,
};

/// How a navigation request ended. Every variant has already been surfaced
/// to the user through the notifier by the time it is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// Marker placed and route drawn.
    Routed {
        name: String,
        summary: RouteSummary,
    },
    /// Marker placed but the routing provider failed; the marker stays.
    MarkerOnly { name: String },
    /// The query matched nothing in the gazetteer or the geocoder.
    NotFound,
}

/// The campus-map application core: search, routing, suggestions, favorites
/// and theming over a set of injected collaborators.
pub struct Wayfinder<S, M, R, G, L, N> {
    gazetteer: Gazetteer,
    store: ProfileStore<S>,
    session: NavigationSession,
    resolver: PlaceResolver<G>,
    ranker: SuggestionRanker,
    surface: M,
    router: R,
    locator: L,
    notifier: N,
    config: WayfinderConfig,
}

impl<S, M, R, G, L, N> Wayfinder<S, M, R, G, L, N>
where
    S: StorageBackend,
    M: MapSurface,
    R: RoutingService,
    G: Geocoder,
    L: Locator,
    N: Notifier,
{
    /// Assemble the core from its collaborators, loading the persisted
    /// profile from `storage`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gazetteer: Gazetteer,
        storage: S,
        surface: M,
        router: R,
        geocoder: G,
        locator: L,
        notifier: N,
        config: WayfinderConfig,
    ) -> Result<Self> {
        let store = ProfileStore::with_capacity(storage, config.history_capacity)?;
        Ok(Self {
            gazetteer,
            store,
            session: NavigationSession::new(config.session),
            resolver: PlaceResolver::new(geocoder),
            ranker: SuggestionRanker::new(config.suggest),
            surface,
            router,
            locator,
            notifier,
            config,
        })
    }

    /// One-shot startup geolocation.
    ///
    /// On success the home slot is set to the acquired position, the map
    /// flies there and a "you are here" marker goes up. On failure the fixed
    /// fallback coordinate is substituted silently except for a one-time
    /// warning notice. Either way search is never blocked.
    #[instrument(name = "Acquire user location", level = "info", skip_all)]
    pub async fn start(&mut self) {
        match self.locator.locate().await {
            Ok(coord) => {
                info!(%coord, "User location acquired");
                self.gazetteer.set_home(coord);
                self.surface
                    .fly_to(coord, 16, self.config.session.fly_duration_secs);
                let marker = self.surface.place_marker(coord, Popup::plain("You are here"));
                self.surface.show_popup(marker);
                self.notifier
                    .notify("Location found successfully!", Severity::Success);
            }
            Err(err) => {
                warn!(error = %err, "Geolocation failed, using fallback position");
                self.gazetteer.set_home(self.config.fallback_location);
                self.notifier.notify(
                    "Location access denied. Using default location.",
                    Severity::Warning,
                );
            }
        }
    }

    /// Resolve free text and highlight it as the active destination.
    ///
    /// The previous destination is torn down before resolution begins, so a
    /// failed search never leaves a stale marker or route on the map. The
    /// query is recorded in the search history before resolution, so
    /// unresolvable queries are remembered too (matching the shipped
    /// viewer). Resolution failures and routing failures are each surfaced
    /// as a single notification and are terminal for this request; nothing
    /// is retried.
    #[instrument(name = "Navigate", level = "info", skip(self))]
    pub async fn navigate(&mut self, query: &str) -> Result<NavigationOutcome> {
        let query = query.trim();
        if query.is_empty() {
            self.notifier
                .notify("Please enter a location to search", Severity::Warning);
            return Ok(NavigationOutcome::NotFound);
        }

        self.session.clear(&mut self.surface);
        self.store.record_search(query)?;

        let candidate = match self.resolver.resolve(&self.gazetteer, query).await {
            Ok(Some(candidate)) => candidate,
            Ok(None) => {
                self.notifier.notify(
                    "Location not found. Please try a different search term.",
                    Severity::Error,
                );
                return Ok(NavigationOutcome::NotFound);
            }
            Err(err) => {
                self.notifier.notify(
                    "Error searching for location. Please try again.",
                    Severity::Error,
                );
                return Err(err.into());
            }
        };

        let outcome = self
            .session
            .activate(
                &mut self.surface,
                &self.router,
                &self.notifier,
                &candidate,
                self.gazetteer.home(),
            )
            .await;

        let name = candidate.display_name().to_owned();
        match outcome {
            Ok(RouteOutcome::Routed(summary)) => Ok(NavigationOutcome::Routed { name, summary }),
            Ok(RouteOutcome::Failed) => Ok(NavigationOutcome::MarkerOnly { name }),
            Err(err @ SessionError::LocationUnavailable) => {
                self.notifier.notify(
                    "Location not available. Please enable location services.",
                    Severity::Error,
                );
                Err(WayfinderError::from(err))
            }
        }
    }

    /// Tear down the active destination marker and route, if any.
    pub fn clear_session(&mut self) {
        self.session.clear(&mut self.surface);
    }

    /// Ordered autocomplete candidates for partial input.
    #[must_use]
    pub fn suggest(&self, input: &str) -> Vec<String> {
        self.ranker.suggest(
            &self.gazetteer,
            self.store.favorites(),
            self.store.history(),
            input,
        )
    }

    /// Add a place to the favorites, notifying either way.
    pub fn add_favorite(&mut self, name: &str) -> Result<FavoriteOutcome> {
        let outcome = self.store.add_favorite(name)?;
        match outcome {
            FavoriteOutcome::Added => self
                .notifier
                .notify(&format!("{name} added to favorites!"), Severity::Success),
            FavoriteOutcome::AlreadyPresent => self.notifier.notify(
                &format!("{name} is already in favorites!"),
                Severity::Warning,
            ),
        }
        Ok(outcome)
    }

    /// Surface how many favorites are available. Returns the count.
    pub fn show_favorites(&self) -> usize {
        let count = self.store.favorites().len();
        if count == 0 {
            self.notifier
                .notify("No favorite locations saved yet.", Severity::Warning);
        } else {
            self.notifier
                .notify(&format!("{count} favorites available"), Severity::Success);
        }
        count
    }

    /// Surface how many recent searches are available. Returns the count.
    pub fn show_history(&self) -> usize {
        let count = self.store.history().len();
        if count == 0 {
            self.notifier
                .notify("No recent searches.", Severity::Warning);
        } else {
            self.notifier.notify(
                &format!("{count} recent searches available"),
                Severity::Success,
            );
        }
        count
    }

    /// Cycle to the next map theme, persisting the choice.
    pub fn toggle_theme(&mut self) -> Result<MapTheme> {
        let theme = self.store.cycle_theme()?;
        self.notifier.notify(theme.switch_notice(), Severity::Info);
        Ok(theme)
    }

    /// Empty the search history and favorites and drop their storage
    /// entries. Irreversible; the caller gates this behind confirmation.
    pub fn clear_data(&mut self) -> Result<()> {
        self.store.clear_all()?;
        self.notifier
            .notify("All data cleared successfully", Severity::Warning);
        Ok(())
    }

    // === Utility accessors ===

    #[must_use]
    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    #[must_use]
    pub fn store(&self) -> &ProfileStore<S> {
        &self.store
    }

    #[must_use]
    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &WayfinderConfig {
        &self.config
    }
}
