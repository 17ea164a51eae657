//! The static place table the campus viewer searches against.
//!
//! A [`Gazetteer`] holds two shapes of entry: bare named points and building
//! records that carry a description and a facility list. Names are unique
//! across the merged namespace. One reserved name, [`HOME_NAME`], stands for
//! the user's current position and lives in a separate mutable slot that
//! starts unresolved until geolocation (or its fallback) fills it in.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

pub use error::GazetteerError;

/// Reserved entry name for the user's current position.
pub const HOME_NAME: &str = "Home";

/// A geographic coordinate in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A single named place known to the gazetteer.
#[derive(Debug, Clone, PartialEq)]
pub enum GazetteerEntry {
    /// A bare named coordinate.
    Point { name: String, coord: Coord },
    /// A building with descriptive metadata shown in its popup.
    Building {
        name: String,
        coord: Coord,
        description: String,
        facilities: Vec<String>,
    },
}

impl GazetteerEntry {
    pub fn point(name: impl Into<String>, coord: Coord) -> Self {
        Self::Point {
            name: name.into(),
            coord,
        }
    }

    pub fn building(
        name: impl Into<String>,
        coord: Coord,
        description: impl Into<String>,
        facilities: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Building {
            name: name.into(),
            coord,
            description: description.into(),
            facilities: facilities.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Point { name, .. } | Self::Building { name, .. } => name,
        }
    }

    #[must_use]
    pub fn coord(&self) -> Coord {
        match self {
            Self::Point { coord, .. } | Self::Building { coord, .. } => *coord,
        }
    }
}

/// Static name-to-place lookup table plus the mutable home slot.
///
/// Lookup is exact and case-preserving. Iteration order over [`names`] is
/// insertion order (points first, then buildings for the campus dataset),
/// which is what the suggestion ranker relies on for its stable tie-breaks.
///
/// [`names`]: Gazetteer::names
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
    by_name: AHashMap<String, usize>,
    home: Option<Coord>,
}

impl Gazetteer {
    /// Build a gazetteer from the given entries.
    ///
    /// Fails if two entries share a name or an entry claims the reserved
    /// [`HOME_NAME`].
    pub fn new(
        entries: impl IntoIterator<Item = GazetteerEntry>,
    ) -> Result<Self, GazetteerError> {
        let entries: Vec<GazetteerEntry> = entries.into_iter().collect();
        let mut by_name = AHashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if entry.name() == HOME_NAME {
                return Err(GazetteerError::ReservedName);
            }
            if by_name.insert(entry.name().to_owned(), idx).is_some() {
                return Err(GazetteerError::DuplicateName(entry.name().to_owned()));
            }
        }
        Ok(Self {
            entries,
            by_name,
            home: None,
        })
    }

    /// The embedded campus dataset the viewer ships with.
    #[must_use]
    pub fn campus() -> Self {
        Self::new(campus_entries()).expect("embedded campus dataset has unique names")
    }

    /// Exact, case-preserving lookup across points and buildings.
    ///
    /// The reserved home name is not an entry; see [`Gazetteer::point`] for
    /// the lookup the resolver uses, which covers it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&GazetteerEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    /// Resolve a name to a point coordinate.
    ///
    /// Covers the reserved home name: while the home slot is unresolved the
    /// reserved name yields `None`, so callers fall through to their next
    /// resolution stage.
    #[must_use]
    pub fn point(&self, name: &str) -> Option<Coord> {
        if name == HOME_NAME {
            return self.home;
        }
        match self.lookup(name) {
            Some(GazetteerEntry::Point { coord, .. }) => Some(*coord),
            _ => None,
        }
    }

    /// Resolve a name to a building entry, if it is one.
    #[must_use]
    pub fn building(&self, name: &str) -> Option<&GazetteerEntry> {
        match self.lookup(name) {
            entry @ Some(GazetteerEntry::Building { .. }) => entry,
            _ => None,
        }
    }

    /// All place names in insertion order, excluding the reserved home name.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(GazetteerEntry::name)
    }

    /// The user's current position, once resolved.
    #[must_use]
    pub fn home(&self) -> Option<Coord> {
        self.home
    }

    /// Set (or replace) the user's current position.
    pub fn set_home(&mut self, coord: Coord) {
        self.home = Some(coord);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The fixed points and buildings of the campus.
fn campus_entries() -> Vec<GazetteerEntry> {
    vec![
        GazetteerEntry::point("Xerox", Coord::new(22.601573181938143, 72.82045628855217)),
        GazetteerEntry::point("Bank", Coord::new(22.60117618960099, 72.82051541076538)),
        GazetteerEntry::point("Canteen", Coord::new(22.601510479109173, 72.82052613960055)),
        GazetteerEntry::point("Admin Office", Coord::new(22.59939, 72.82045)),
        GazetteerEntry::point("Hospital", Coord::new(22.602696581265278, 72.82126642928722)),
        GazetteerEntry::building(
            "A2 Building RPCP",
            Coord::new(22.599368402415315, 72.81978535046156),
            "Research and Project Center",
            ["Research Labs", "Project Rooms", "Conference Hall"],
        ),
        GazetteerEntry::building(
            "A3 Building IIIM",
            Coord::new(22.600035369257835, 72.82076191232372),
            "Institute of Infrastructure, Technology, Research and Management",
            ["Lecture Halls", "Computer Labs", "Library"],
        ),
        GazetteerEntry::building(
            "A5 DEPSTAR BUILDING",
            Coord::new(22.600820337176675, 72.82026689653912),
            "Department of Science and Technology",
            ["Science Labs", "Engineering Workshops", "Cafeteria"],
        ),
        GazetteerEntry::building(
            "A6 CSPIT EC Building",
            Coord::new(22.60029, 72.81946),
            "Electronics and Communication Department",
            ["EC Labs", "Research Center", "Seminar Halls"],
        ),
        GazetteerEntry::building(
            "A7 CSPIT CE Building",
            Coord::new(22.59951, 72.81817),
            "Civil Engineering Department",
            ["CE Labs", "Drawing Halls", "Material Testing Lab"],
        ),
        GazetteerEntry::building(
            "A8 PDPIAS BUILDING",
            Coord::new(22.601687189963116, 72.819595859821),
            "P. D. Patel Institute of Applied Sciences",
            ["Science Labs", "Research Facilities", "Auditorium"],
        ),
        GazetteerEntry::building(
            "A9 CMPICA BUILDING",
            Coord::new(22.603348466570708, 72.8184282975782),
            "Charotar Institute of Computer Applications",
            ["Computer Labs", "IT Infrastructure", "Innovation Hub"],
        ),
    ]
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum GazetteerError {
        #[error("duplicate place name: {0}")]
        DuplicateName(String),
        #[error("the reserved home name cannot be used as an entry name")]
        ReservedName,
    }
}
