//! Integration tests for the wayfinder core.
//!
//! These run against the full public API with scripted collaborators: a
//! recording map surface, stub routing/geocoding/geolocation providers and
//! an in-memory storage backend.

use std::{cell::RefCell, rc::Rc};

use wayfinder::{
    Coord, FAVORITES_KEY, FavoriteOutcome, Gazetteer, GeocodeHit, Geocoder, HISTORY_KEY,
    JsonFileStorage, Locator, MapSurface, MapTheme, MarkerHandle, MemoryStorage, NavigationOutcome,
    Notifier, Popup, RouteHandle, RouteSummary, RoutingService, Severity, StorageBackend,
    Wayfinder, WayfinderConfig,
    provider::{GeocodeError, LocateError, RouteError},
};

fn setup_test_env() {
    let _ = wayfinder::init_logging(tracing::Level::WARN);
}

#[derive(Debug, Clone, PartialEq)]
enum SurfaceCall {
    FlyTo(u8),
    PlaceMarker(u64),
    ShowPopup(u64),
    RemoveMarker(u64),
    DrawRoute(u64),
    RemoveRoute(u64),
}

#[derive(Debug, Default)]
struct RecordingSurface {
    next_handle: u64,
    calls: Vec<SurfaceCall>,
}

impl MapSurface for RecordingSurface {
    fn place_marker(&mut self, _coord: Coord, _popup: Popup) -> MarkerHandle {
        self.next_handle += 1;
        self.calls.push(SurfaceCall::PlaceMarker(self.next_handle));
        MarkerHandle(self.next_handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.calls.push(SurfaceCall::RemoveMarker(handle.0));
    }

    fn draw_route(&mut self, _from: Coord, _to: Coord) -> RouteHandle {
        self.next_handle += 1;
        self.calls.push(SurfaceCall::DrawRoute(self.next_handle));
        RouteHandle(self.next_handle)
    }

    fn remove_route(&mut self, handle: RouteHandle) {
        self.calls.push(SurfaceCall::RemoveRoute(handle.0));
    }

    fn fly_to(&mut self, _coord: Coord, zoom: u8, _duration_secs: f64) {
        self.calls.push(SurfaceCall::FlyTo(zoom));
    }

    fn show_popup(&mut self, handle: MarkerHandle) {
        self.calls.push(SurfaceCall::ShowPopup(handle.0));
    }
}

struct StubRouter {
    fail: bool,
}

impl RoutingService for StubRouter {
    async fn route(&self, _from: Coord, _to: Coord) -> Result<RouteSummary, RouteError> {
        if self.fail {
            return Err(RouteError::NoRoute);
        }
        Ok(RouteSummary {
            distance_meters: 2500.0,
            duration_seconds: 600.0,
        })
    }
}

struct StubGeocoder {
    hits: Vec<GeocodeHit>,
    calls: Rc<RefCell<usize>>,
}

impl StubGeocoder {
    fn empty() -> Self {
        Self {
            hits: Vec::new(),
            calls: Rc::default(),
        }
    }

    fn returning(hits: Vec<GeocodeHit>) -> Self {
        Self {
            hits,
            calls: Rc::default(),
        }
    }

    fn call_counter(&self) -> Rc<RefCell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl Geocoder for StubGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Vec<GeocodeHit>, GeocodeError> {
        *self.calls.borrow_mut() += 1;
        Ok(self.hits.clone())
    }
}

struct StubLocator {
    result: Result<Coord, ()>,
}

impl Locator for StubLocator {
    async fn locate(&self) -> Result<Coord, LocateError> {
        self.result.map_err(|()| LocateError::Denied)
    }
}

#[derive(Default, Clone)]
struct SinkNotifier {
    messages: Rc<RefCell<Vec<(String, Severity)>>>,
}

impl SinkNotifier {
    fn contains(&self, needle: &str) -> bool {
        self.messages
            .borrow()
            .iter()
            .any(|(message, _)| message.contains(needle))
    }
}

impl Notifier for SinkNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages.borrow_mut().push((message.to_owned(), severity));
    }
}

type TestWayfinder =
    Wayfinder<MemoryStorage, RecordingSurface, StubRouter, StubGeocoder, StubLocator, SinkNotifier>;

fn app_with(geocoder: StubGeocoder, router: StubRouter, locator: StubLocator) -> TestWayfinder {
    setup_test_env();
    Wayfinder::new(
        Gazetteer::campus(),
        MemoryStorage::new(),
        RecordingSurface::default(),
        router,
        geocoder,
        locator,
        SinkNotifier::default(),
        WayfinderConfig::default(),
    )
    .expect("Should assemble wayfinder")
}

fn app() -> TestWayfinder {
    app_with(
        StubGeocoder::empty(),
        StubRouter { fail: false },
        StubLocator {
            result: Ok(Coord::new(22.5992, 72.7959)),
        },
    )
}

#[tokio::test]
async fn test_full_workflow() {
    let mut app = app();
    app.start().await;
    assert!(app.gazetteer().home().is_some(), "Home should be resolved");

    let outcome = app.navigate("Canteen").await.expect("Navigation should work");
    match outcome {
        NavigationOutcome::Routed { name, summary } => {
            assert_eq!(name, "Canteen");
            assert!((summary.distance_km() - 2.5).abs() < f64::EPSILON);
        }
        other => panic!("expected routed outcome, got {other:?}"),
    }

    assert!(app.session().marker().is_some());
    assert!(app.session().route().is_some());
    assert_eq!(app.store().history(), ["Canteen"]);
}

#[tokio::test]
async fn test_gazetteer_hit_skips_geocoder() {
    let geocoder = StubGeocoder::empty();
    let calls = geocoder.call_counter();
    let mut app = app_with(
        geocoder,
        StubRouter { fail: false },
        StubLocator {
            result: Ok(Coord::new(22.5992, 72.7959)),
        },
    );
    app.start().await;

    app.navigate("Hospital").await.unwrap();
    app.navigate("A3 Building IIIM").await.unwrap();
    app.navigate("Bank").await.unwrap();

    assert_eq!(*calls.borrow(), 0, "Gazetteer hits must never geocode");
    assert_eq!(app.store().history().len(), 3);
}

#[tokio::test]
async fn test_geocoder_fallback() {
    let mut app = app_with(
        StubGeocoder::returning(vec![GeocodeHit {
            coord: Coord::new(22.556, 72.951),
            label: "Anand, Gujarat, India".into(),
        }]),
        StubRouter { fail: false },
        StubLocator {
            result: Ok(Coord::new(22.5992, 72.7959)),
        },
    );
    app.start().await;

    let outcome = app.navigate("Anand").await.unwrap();
    assert!(matches!(
        outcome,
        NavigationOutcome::Routed { ref name, .. } if name == "Anand, Gujarat, India"
    ));
}

#[tokio::test]
async fn test_unknown_place_is_not_found() {
    setup_test_env();
    let notifier = SinkNotifier::default();
    let mut app = Wayfinder::new(
        Gazetteer::campus(),
        MemoryStorage::new(),
        RecordingSurface::default(),
        StubRouter { fail: false },
        StubGeocoder::empty(),
        StubLocator {
            result: Ok(Coord::new(22.5992, 72.7959)),
        },
        notifier.clone(),
        WayfinderConfig::default(),
    )
    .unwrap();
    app.start().await;

    let outcome = app.navigate("xyz-nonexistent").await.unwrap();
    assert_eq!(outcome, NavigationOutcome::NotFound);
    assert!(app.session().marker().is_none());
    assert!(notifier.contains("Location not found"));
    // The failed query is still remembered
    assert_eq!(app.store().history(), ["xyz-nonexistent"]);
}

#[tokio::test]
async fn test_failed_search_clears_previous_session() {
    let mut app = app();
    app.start().await;

    app.navigate("Canteen").await.unwrap();
    assert!(app.session().marker().is_some());
    assert!(app.session().route().is_some());

    // An unresolvable follow-up search tears the old destination down
    let outcome = app.navigate("xyz-nonexistent").await.unwrap();
    assert_eq!(outcome, NavigationOutcome::NotFound);
    assert!(app.session().marker().is_none());
    assert!(app.session().route().is_none());
}

#[tokio::test]
async fn test_geolocation_failure_falls_back() {
    let mut app = app_with(
        StubGeocoder::empty(),
        StubRouter { fail: false },
        StubLocator { result: Err(()) },
    );
    app.start().await;

    assert_eq!(app.gazetteer().home(), Some(wayfinder::FALLBACK_LOCATION));

    // Navigation still works from the fallback position
    let outcome = app.navigate("Bank").await.unwrap();
    assert!(matches!(outcome, NavigationOutcome::Routed { .. }));
}

#[tokio::test]
async fn test_route_failure_keeps_marker() {
    let mut app = app_with(
        StubGeocoder::empty(),
        StubRouter { fail: true },
        StubLocator {
            result: Ok(Coord::new(22.5992, 72.7959)),
        },
    );
    app.start().await;

    let outcome = app.navigate("Xerox").await.unwrap();
    assert!(matches!(outcome, NavigationOutcome::MarkerOnly { .. }));
    assert!(app.session().marker().is_some());
    assert!(app.session().route().is_none());
}

#[tokio::test]
async fn test_navigate_without_location_is_an_error() {
    // start() never ran, so the home slot is unresolved
    let mut app = app();

    let result = app.navigate("Canteen").await;
    assert!(result.is_err());
    assert!(app.session().marker().is_none());
}

#[tokio::test]
async fn test_favorites_and_suggestions() {
    let mut app = app();
    app.start().await;

    assert_eq!(app.add_favorite("Bank").unwrap(), FavoriteOutcome::Added);
    assert_eq!(
        app.add_favorite("Bank").unwrap(),
        FavoriteOutcome::AlreadyPresent
    );

    app.navigate("Canteen").await.unwrap();

    // Empty input previews favorites then history
    assert_eq!(app.suggest(""), ["Bank", "Canteen"]);

    // Exact match first, capped at the configured limit
    let suggestions = app.suggest("hospital");
    assert_eq!(suggestions[0], "Hospital");
    assert!(suggestions.len() <= 10);

    assert_eq!(app.show_favorites(), 1);
    assert_eq!(app.show_history(), 1);
}

#[tokio::test]
async fn test_clear_data() {
    let mut app = app();
    app.start().await;

    app.navigate("Canteen").await.unwrap();
    app.add_favorite("Bank").unwrap();
    app.clear_data().unwrap();

    assert!(app.store().history().is_empty());
    assert!(app.store().favorites().is_empty());
    assert_eq!(app.suggest(""), Vec::<String>::new());
}

#[tokio::test]
async fn test_theme_toggle_cycles() {
    let mut app = app();

    assert_eq!(app.toggle_theme().unwrap(), MapTheme::Dark);
    assert_eq!(app.toggle_theme().unwrap(), MapTheme::Satellite);
    assert_eq!(app.toggle_theme().unwrap(), MapTheme::Streets);
}

#[tokio::test]
async fn test_profile_survives_restart_via_file_storage() {
    setup_test_env();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("profile.json");

    {
        let mut app = Wayfinder::new(
            Gazetteer::campus(),
            JsonFileStorage::open(&path).unwrap(),
            RecordingSurface::default(),
            StubRouter { fail: false },
            StubGeocoder::empty(),
            StubLocator {
                result: Ok(Coord::new(22.5992, 72.7959)),
            },
            SinkNotifier::default(),
            WayfinderConfig::default(),
        )
        .unwrap();
        app.start().await;
        app.navigate("Canteen").await.unwrap();
        app.add_favorite("Bank").unwrap();
    }

    let backend = JsonFileStorage::open(&path).unwrap();
    assert_eq!(
        backend.get(HISTORY_KEY).unwrap().as_deref(),
        Some(r#"["Canteen"]"#)
    );
    assert_eq!(
        backend.get(FAVORITES_KEY).unwrap().as_deref(),
        Some(r#"["Bank"]"#)
    );
}

#[tokio::test]
async fn test_empty_query_is_rejected_up_front() {
    let mut app = app();
    app.start().await;

    let outcome = app.navigate("   ").await.unwrap();
    assert_eq!(outcome, NavigationOutcome::NotFound);
    // Rejected input is neither recorded nor resolved
    assert!(app.store().history().is_empty());
}
