//! Wayfinder - Campus Map Search and Navigation Core
//!
//! Wayfinder is the engine behind a campus-map viewer: it resolves free-text
//! queries against a static gazetteer with an external-geocoder fallback,
//! manages the single live destination (marker + route) on the map, ranks
//! autocomplete suggestions, and persists search history, favorites and the
//! selected tile theme.
//!
//! Everything with a suspension point or an on-screen surface is a
//! collaborator behind a trait in [`provider`]: the map widget, the routing
//! backend, the geocoder, geolocation, key-value storage and notifications.
//! The core itself is single-threaded and event-driven; each navigation
//! request runs to completion before the next may begin.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use wayfinder::{Gazetteer, Wayfinder, WayfinderConfig};
//!
//! let mut app = Wayfinder::new(
//!     Gazetteer::campus(),
//!     storage,   // StorageBackend, e.g. JsonFileStorage
//!     surface,   // MapSurface
//!     router,    // RoutingService
//!     geocoder,  // Geocoder
//!     locator,   // Locator
//!     notifier,  // Notifier
//!     WayfinderConfig::default(),
//! )?;
//!
//! app.start().await;                         // one-shot geolocation
//! let outcome = app.navigate("Canteen").await?;
//! let suggestions = app.suggest("ca");
//! ```
//!
//! # Behavior notes
//!
//! - A gazetteer hit never touches the network; the geocoder is strictly a
//!   fallback.
//! - A routing failure leaves the destination marker in place: partial
//!   success is shown, not rolled back.
//! - A search already present in the history keeps its position rather than
//!   being promoted to the front; this matches the shipped viewer.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
pub mod error;
mod gazetteer;
pub mod provider;
mod resolve;
mod session;
mod store;
mod suggest;
mod theme;

pub use config::{
    FALLBACK_LOCATION, SessionConfig, SuggestConfig, WayfinderConfig, WayfinderConfigBuilder,
};
pub use self::core::{NavigationOutcome, Wayfinder};
pub use gazetteer::{Coord, Gazetteer, GazetteerEntry, HOME_NAME};
pub use provider::{
    GeocodeHit, Geocoder, JsonFileStorage, Locator, MapSurface, MarkerHandle, MemoryStorage,
    Notifier, Popup, RouteHandle, RouteSummary, RoutingService, Severity, StorageBackend,
};
pub use resolve::{Candidate, PlaceResolver};
pub use session::{NavigationSession, RouteOutcome};
pub use store::{FAVORITES_KEY, FavoriteOutcome, HISTORY_KEY, ProfileStore, THEME_KEY};
pub use suggest::SuggestionRanker;
pub use theme::MapTheme;

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Wayfinder library.
///
/// This sets up structured logging with configurable levels and filtering.
/// Call this once at the start of your application to enable detailed
/// logging output from Wayfinder operations.
///
/// # Arguments
///
/// * `level` - The minimum log level to display
///
/// # Examples
///
/// ```rust
/// use tracing::Level;
/// use wayfinder::init_logging;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), wayfinder::error::WayfinderError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::WayfinderError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("hyper_util=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}
