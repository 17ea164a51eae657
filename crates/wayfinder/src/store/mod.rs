//! Persisted user profile: search history, favorites and the map theme.
//!
//! Backed by a durable key-value [`StorageBackend`] under the storage keys
//! the original deployment used, so an existing browser profile reads back
//! unchanged. Every mutating operation persists the full updated collection
//! synchronously before returning.

use tracing::{debug, instrument};

pub use error::StoreError;
use error::Result;

use crate::{provider::StorageBackend, theme::MapTheme};

/// Storage key for the JSON-encoded search history list.
pub const HISTORY_KEY: &str = "searchHistory";
/// Storage key for the JSON-encoded favorites list.
pub const FAVORITES_KEY: &str = "favoriteLocations";
/// Storage key for the persisted theme name.
pub const THEME_KEY: &str = "mapTheme";

/// Default bound on the search history length.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Result of attempting to favorite a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    /// The name was already a favorite; the set is unchanged and the caller
    /// should surface a distinct notice.
    AlreadyPresent,
}

/// Search history (most-recent-first, bounded), favorites (insertion-ordered
/// set) and the selected theme, loaded from the backend at construction.
#[derive(Debug)]
pub struct ProfileStore<S> {
    backend: S,
    history: Vec<String>,
    favorites: Vec<String>,
    theme: MapTheme,
    capacity: usize,
}

impl<S: StorageBackend> ProfileStore<S> {
    /// Load the persisted profile with the default history bound.
    pub fn load(backend: S) -> Result<Self> {
        Self::with_capacity(backend, DEFAULT_HISTORY_CAPACITY)
    }

    /// Load the persisted profile with a custom history bound.
    #[instrument(name = "Load profile store", level = "debug", skip(backend))]
    pub fn with_capacity(backend: S, capacity: usize) -> Result<Self> {
        let history = read_list(&backend, HISTORY_KEY)?;
        let favorites = read_list(&backend, FAVORITES_KEY)?;
        let theme = backend
            .get(THEME_KEY)?
            .map_or_else(MapTheme::default, |value| MapTheme::parse(&value));
        debug!(
            history = history.len(),
            favorites = favorites.len(),
            theme = theme.as_str(),
            "Profile loaded"
        );
        Ok(Self {
            backend,
            history,
            favorites,
            theme,
            capacity,
        })
    }

    /// Record a search in the history.
    ///
    /// A name already present keeps its position untouched (it is not
    /// promoted to the front; this preserves the observed behavior of the
    /// original viewer). A new name is inserted at the front and the oldest
    /// entry is evicted beyond the bound.
    pub fn record_search(&mut self, name: &str) -> Result<()> {
        if self.history.iter().any(|entry| entry == name) {
            return Ok(());
        }
        self.history.insert(0, name.to_owned());
        if self.history.len() > self.capacity {
            self.history.pop();
        }
        self.persist_history()
    }

    /// Add a name to the favorites set.
    pub fn add_favorite(&mut self, name: &str) -> Result<FavoriteOutcome> {
        if self.favorites.iter().any(|entry| entry == name) {
            return Ok(FavoriteOutcome::AlreadyPresent);
        }
        self.favorites.push(name.to_owned());
        self.persist_favorites()?;
        Ok(FavoriteOutcome::Added)
    }

    /// Cycle to the next map theme and persist the choice.
    pub fn cycle_theme(&mut self) -> Result<MapTheme> {
        self.theme = self.theme.next();
        self.backend.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    /// Empty history and favorites and drop their storage entries.
    ///
    /// Irreversible; confirmation belongs to the UI collaborator. The theme
    /// choice is deliberately kept.
    pub fn clear_all(&mut self) -> Result<()> {
        self.history.clear();
        self.favorites.clear();
        self.backend.remove(HISTORY_KEY)?;
        self.backend.remove(FAVORITES_KEY)?;
        Ok(())
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    #[must_use]
    pub fn theme(&self) -> MapTheme {
        self.theme
    }

    fn persist_history(&mut self) -> Result<()> {
        let encoded = serde_json::to_string(&self.history)?;
        self.backend.set(HISTORY_KEY, &encoded)?;
        Ok(())
    }

    fn persist_favorites(&mut self) -> Result<()> {
        let encoded = serde_json::to_string(&self.favorites)?;
        self.backend.set(FAVORITES_KEY, &encoded)?;
        Ok(())
    }
}

fn read_list<S: StorageBackend>(backend: &S, key: &str) -> Result<Vec<String>> {
    match backend.get(key)? {
        Some(encoded) => Ok(serde_json::from_str(&encoded)?),
        None => Ok(Vec::new()),
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum StoreError {
        #[error("Storage error: {0}")]
        Storage(#[from] crate::provider::StorageError),
        #[error("Corrupt persisted list: {0}")]
        Serde(#[from] serde_json::Error),
    }
    pub type Result<T> = std::result::Result<T, StoreError>;
}
