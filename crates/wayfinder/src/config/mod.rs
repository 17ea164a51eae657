use crate::{error::WayfinderError, gazetteer::Coord, store::DEFAULT_HISTORY_CAPACITY};

/// Default position substituted when geolocation fails: the campus entrance.
pub const FALLBACK_LOCATION: Coord = Coord::new(22.599_220, 72.795_967);

/// View behavior of the navigation session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Zoom level used when flying to a gazetteer hit.
    pub gazetteer_zoom: u8,
    /// Zoom level used when flying to a geocoded hit.
    pub geocoded_zoom: u8,
    /// Duration of the fly-to animation in seconds.
    pub fly_duration_secs: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gazetteer_zoom: 18,
            geocoded_zoom: 15,
            fly_duration_secs: 1.5,
        }
    }
}

/// Caps applied by the suggestion ranker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestConfig {
    /// Overall cap on returned suggestions.
    pub limit: usize,
    /// Favorites shown for empty input.
    pub favorites_preview: usize,
    /// History entries shown for empty input.
    pub history_preview: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            favorites_preview: 5,
            history_preview: 5,
        }
    }
}

/// Complete configuration for a [`Wayfinder`](crate::Wayfinder).
#[derive(Debug, Clone, PartialEq)]
pub struct WayfinderConfig {
    pub session: SessionConfig,
    pub suggest: SuggestConfig,
    pub history_capacity: usize,
    pub fallback_location: Coord,
}

impl Default for WayfinderConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            suggest: SuggestConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            fallback_location: FALLBACK_LOCATION,
        }
    }
}

impl WayfinderConfig {
    #[must_use]
    pub fn builder() -> WayfinderConfigBuilder {
        WayfinderConfigBuilder::new()
    }
}

/// Builder for creating wayfinder configurations with ergonomic defaults.
#[derive(Debug, Clone, Default)]
pub struct WayfinderConfigBuilder {
    config: WayfinderConfig,
}

impl WayfinderConfigBuilder {
    /// Create a new builder with sensible defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: WayfinderConfig::default(),
        }
    }

    /// Create a builder tuned for small kiosk screens (shorter lists,
    /// snappier camera).
    #[must_use]
    pub fn kiosk() -> Self {
        let mut builder = Self::new();
        builder.config.suggest.limit = 5;
        builder.config.suggest.favorites_preview = 3;
        builder.config.suggest.history_preview = 2;
        builder.config.session.fly_duration_secs = 0.75;
        builder
    }

    /// Set the overall cap on returned suggestions.
    #[must_use]
    pub fn suggestion_limit(mut self, limit: usize) -> Self {
        self.config.suggest.limit = limit;
        self
    }

    /// Set how many favorites and history entries preview for empty input.
    ///
    /// The two previews together may not exceed the suggestion limit.
    pub fn empty_input_previews(
        mut self,
        favorites: usize,
        history: usize,
    ) -> Result<Self, WayfinderError> {
        if favorites + history > self.config.suggest.limit {
            return Err(WayfinderError::ConfigError(format!(
                "empty-input previews ({favorites} + {history}) exceed the suggestion limit of {}",
                self.config.suggest.limit
            )));
        }
        self.config.suggest.favorites_preview = favorites;
        self.config.suggest.history_preview = history;
        Ok(self)
    }

    /// Set the bound on the search history length.
    #[must_use]
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Set the zoom levels for gazetteer and geocoded hits (clamped to the
    /// tile range 1-19).
    #[must_use]
    pub fn zoom_levels(mut self, gazetteer: u8, geocoded: u8) -> Self {
        self.config.session.gazetteer_zoom = gazetteer.clamp(1, 19);
        self.config.session.geocoded_zoom = geocoded.clamp(1, 19);
        self
    }

    /// Set the fly-to animation duration in seconds.
    #[must_use]
    pub fn fly_duration(mut self, secs: f64) -> Self {
        self.config.session.fly_duration_secs = secs;
        self
    }

    /// Set the coordinate substituted when geolocation fails.
    #[must_use]
    pub fn fallback_location(mut self, coord: Coord) -> Self {
        self.config.fallback_location = coord;
        self
    }

    /// Build the final configuration.
    #[must_use]
    pub fn build(self) -> WayfinderConfig {
        self.config
    }
}
