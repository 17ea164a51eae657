//! Free-text place resolution.
//!
//! Resolution tries the gazetteer first (points, then buildings, both exact
//! and case-preserving) and only then suspends on the external geocoder.
//! A gazetteer hit therefore never touches the network. Resolution has no
//! side effects: it mutates neither the gazetteer, nor the stores, nor the
//! session.

use tracing::{debug, instrument};

pub use error::ResolveError;
use error::Result;

use crate::{
    gazetteer::{Coord, Gazetteer, GazetteerEntry},
    provider::{Geocoder, Popup},
};

/// A resolved, displayable location result.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// Exact hit on a gazetteer point.
    Point { name: String, coord: Coord },
    /// Exact hit on a gazetteer building, with its popup metadata.
    Building {
        name: String,
        coord: Coord,
        description: String,
        facilities: Vec<String>,
    },
    /// First result from the external geocoder.
    Geocoded { label: String, coord: Coord },
}

impl Candidate {
    #[must_use]
    pub fn coord(&self) -> Coord {
        match self {
            Self::Point { coord, .. }
            | Self::Building { coord, .. }
            | Self::Geocoded { coord, .. } => *coord,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Point { name, .. } | Self::Building { name, .. } => name,
            Self::Geocoded { label, .. } => label,
        }
    }

    /// Whether this came from the external geocoder rather than the
    /// gazetteer. Geocoded hits get a wider view when flown to.
    #[must_use]
    pub fn is_geocoded(&self) -> bool {
        matches!(self, Self::Geocoded { .. })
    }

    /// The popup payload the session attaches to this candidate's marker.
    #[must_use]
    pub fn popup(&self) -> Popup {
        match self {
            Self::Point { name, .. } => Popup::plain(name.clone()),
            Self::Building {
                name,
                description,
                facilities,
                ..
            } => Popup {
                title: name.clone(),
                description: Some(description.clone()),
                facilities: facilities.clone(),
                offer_favorite: true,
            },
            Self::Geocoded { label, .. } => Popup {
                title: label.clone(),
                description: None,
                facilities: Vec::new(),
                offer_favorite: true,
            },
        }
    }
}

/// Resolves free text to a [`Candidate`] via the gazetteer, falling back to
/// the external geocoder.
#[derive(Debug, Clone)]
pub struct PlaceResolver<G> {
    geocoder: G,
}

impl<G: Geocoder> PlaceResolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    /// Resolve `query` against the gazetteer, then the geocoder.
    ///
    /// `Ok(None)` means nothing matched anywhere. A geocoder transport
    /// failure is a distinct [`ResolveError::Geocoder`], never an empty
    /// result. The unresolved reserved home name falls through to the
    /// geocoder like any other unknown string.
    #[instrument(name = "Resolve place", level = "debug", skip(self, gazetteer))]
    pub async fn resolve(
        &self,
        gazetteer: &Gazetteer,
        query: &str,
    ) -> Result<Option<Candidate>> {
        if let Some(coord) = gazetteer.point(query) {
            debug!(query, "Resolved against gazetteer point table");
            return Ok(Some(Candidate::Point {
                name: query.to_owned(),
                coord,
            }));
        }

        if let Some(GazetteerEntry::Building {
            name,
            coord,
            description,
            facilities,
        }) = gazetteer.building(query)
        {
            debug!(query, "Resolved against gazetteer building table");
            return Ok(Some(Candidate::Building {
                name: name.clone(),
                coord: *coord,
                description: description.clone(),
                facilities: facilities.clone(),
            }));
        }

        debug!(query, "No gazetteer match, delegating to geocoder");
        let hits = self.geocoder.geocode(query).await?;
        // No ranking among provider results: first hit wins.
        Ok(hits.into_iter().next().map(|hit| Candidate::Geocoded {
            label: hit.label,
            coord: hit.coord,
        }))
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum ResolveError {
        #[error("Geocoder error: {0}")]
        Geocoder(#[from] crate::provider::GeocodeError),
        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }
    pub type Result<T> = std::result::Result<T, ResolveError>;
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{
        gazetteer::HOME_NAME,
        provider::{GeocodeError, GeocodeHit},
    };

    /// Scripted geocoder that counts how often it is consulted.
    struct StubGeocoder {
        hits: Vec<GeocodeHit>,
        fail: bool,
        calls: RefCell<usize>,
    }

    impl StubGeocoder {
        fn returning(hits: Vec<GeocodeHit>) -> Self {
            Self {
                hits,
                fail: false,
                calls: RefCell::new(0),
            }
        }

        fn empty() -> Self {
            Self::returning(Vec::new())
        }

        fn failing() -> Self {
            Self {
                hits: Vec::new(),
                fail: true,
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl Geocoder for StubGeocoder {
        async fn geocode(&self, _query: &str) -> std::result::Result<Vec<GeocodeHit>, GeocodeError> {
            *self.calls.borrow_mut() += 1;
            if self.fail {
                return Err(GeocodeError::Transport("connection reset".into()));
            }
            Ok(self.hits.clone())
        }
    }

    #[tokio::test]
    async fn gazetteer_point_short_circuits_geocoder() {
        let resolver = PlaceResolver::new(StubGeocoder::empty());
        let gazetteer = Gazetteer::campus();

        let candidate = resolver.resolve(&gazetteer, "Canteen").await.unwrap();
        assert!(matches!(
            candidate,
            Some(Candidate::Point { ref name, .. }) if name == "Canteen"
        ));
        assert_eq!(resolver.geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn gazetteer_building_short_circuits_geocoder() {
        let resolver = PlaceResolver::new(StubGeocoder::empty());
        let gazetteer = Gazetteer::campus();

        let candidate = resolver
            .resolve(&gazetteer, "A5 DEPSTAR BUILDING")
            .await
            .unwrap();
        match candidate {
            Some(Candidate::Building {
                name, facilities, ..
            }) => {
                assert_eq!(name, "A5 DEPSTAR BUILDING");
                assert_eq!(facilities.len(), 3);
            }
            other => panic!("expected building candidate, got {other:?}"),
        }
        assert_eq!(resolver.geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_query_yields_not_found_against_empty_geocoder() {
        let resolver = PlaceResolver::new(StubGeocoder::empty());
        let gazetteer = Gazetteer::campus();

        assert!(resolver.resolve(&gazetteer, "").await.unwrap().is_none());
        assert!(
            resolver
                .resolve(&gazetteer, "xyz-nonexistent")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(resolver.geocoder.calls(), 2);
    }

    #[tokio::test]
    async fn first_geocoder_hit_wins() {
        let resolver = PlaceResolver::new(StubGeocoder::returning(vec![
            GeocodeHit {
                coord: Coord::new(23.02, 72.57),
                label: "Ahmedabad, Gujarat".into(),
            },
            GeocodeHit {
                coord: Coord::new(19.07, 72.87),
                label: "Mumbai, Maharashtra".into(),
            },
        ]));
        let gazetteer = Gazetteer::campus();

        let candidate = resolver.resolve(&gazetteer, "Ahmedabad").await.unwrap();
        assert!(matches!(
            candidate,
            Some(Candidate::Geocoded { ref label, .. }) if label == "Ahmedabad, Gujarat"
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_distinct_from_not_found() {
        let resolver = PlaceResolver::new(StubGeocoder::failing());
        let gazetteer = Gazetteer::campus();

        let err = resolver
            .resolve(&gazetteer, "somewhere far")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Geocoder(_)));
    }

    #[tokio::test]
    async fn unresolved_home_falls_through_to_geocoder() {
        let resolver = PlaceResolver::new(StubGeocoder::empty());
        let mut gazetteer = Gazetteer::campus();

        assert!(
            resolver
                .resolve(&gazetteer, HOME_NAME)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(resolver.geocoder.calls(), 1);

        gazetteer.set_home(Coord::new(22.5992, 72.7959));
        let candidate = resolver.resolve(&gazetteer, HOME_NAME).await.unwrap();
        assert!(matches!(
            candidate,
            Some(Candidate::Point { ref name, .. }) if name == HOME_NAME
        ));
        // Resolved home never consults the geocoder again
        assert_eq!(resolver.geocoder.calls(), 1);
    }

    #[test]
    fn popup_payload_follows_candidate_tag() {
        let point = Candidate::Point {
            name: "Bank".into(),
            coord: Coord::new(1.0, 2.0),
        };
        assert_eq!(point.popup(), Popup::plain("Bank"));

        let building = Candidate::Building {
            name: "A2 Building RPCP".into(),
            coord: Coord::new(1.0, 2.0),
            description: "Research and Project Center".into(),
            facilities: vec!["Research Labs".into()],
        };
        let popup = building.popup();
        assert!(popup.offer_favorite);
        assert_eq!(popup.description.as_deref(), Some("Research and Project Center"));
        assert_eq!(popup.facilities.len(), 1);

        let geocoded = Candidate::Geocoded {
            label: "Anand, Gujarat".into(),
            coord: Coord::new(1.0, 2.0),
        };
        let popup = geocoded.popup();
        assert!(popup.offer_favorite);
        assert!(popup.description.is_none());
    }
}
