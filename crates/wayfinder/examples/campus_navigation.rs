//! End-to-end campus navigation with console collaborators.
//!
//! Run with: cargo run --example campus_navigation

use wayfinder::{
    Coord, Gazetteer, GeocodeHit, Geocoder, Locator, MapSurface, MarkerHandle, MemoryStorage,
    Notifier, Popup, RouteHandle, RouteSummary, RoutingService, Severity, Wayfinder,
    WayfinderConfig,
    provider::{GeocodeError, LocateError, RouteError},
};

/// Prints surface operations instead of drawing them.
#[derive(Default)]
struct ConsoleSurface {
    next_handle: u64,
}

impl MapSurface for ConsoleSurface {
    fn place_marker(&mut self, coord: Coord, popup: Popup) -> MarkerHandle {
        self.next_handle += 1;
        println!("[map] marker #{} at {coord}: {}", self.next_handle, popup.title);
        MarkerHandle(self.next_handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        println!("[map] remove marker #{}", handle.0);
    }

    fn draw_route(&mut self, from: Coord, to: Coord) -> RouteHandle {
        self.next_handle += 1;
        println!("[map] route #{} {from} -> {to}", self.next_handle);
        RouteHandle(self.next_handle)
    }

    fn remove_route(&mut self, handle: RouteHandle) {
        println!("[map] remove route #{}", handle.0);
    }

    fn fly_to(&mut self, coord: Coord, zoom: u8, duration_secs: f64) {
        println!("[map] fly to {coord} (zoom {zoom}, {duration_secs}s)");
    }

    fn show_popup(&mut self, handle: MarkerHandle) {
        println!("[map] open popup on marker #{}", handle.0);
    }
}

/// Straight-line stand-in for a routing backend.
struct CrowFliesRouter;

impl RoutingService for CrowFliesRouter {
    async fn route(&self, from: Coord, to: Coord) -> Result<RouteSummary, RouteError> {
        // Equirectangular approximation is plenty at campus scale
        let mean_lat = f64::midpoint(from.lat, to.lat).to_radians();
        let dx = (to.lon - from.lon).to_radians() * mean_lat.cos();
        let dy = (to.lat - from.lat).to_radians();
        let meters = (dx.hypot(dy)) * 6_371_000.0;
        Ok(RouteSummary {
            distance_meters: meters,
            duration_seconds: meters / 1.4, // walking pace
        })
    }
}

struct NoGeocoder;

impl Geocoder for NoGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Vec<GeocodeHit>, GeocodeError> {
        Ok(Vec::new())
    }
}

struct FixedLocator;

impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coord, LocateError> {
        Ok(Coord::new(22.5992, 72.7959))
    }
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        println!("[{severity:?}] {message}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    wayfinder::init_logging(tracing::Level::INFO)?;

    let mut app = Wayfinder::new(
        Gazetteer::campus(),
        MemoryStorage::new(),
        ConsoleSurface::default(),
        CrowFliesRouter,
        NoGeocoder,
        FixedLocator,
        ConsoleNotifier,
        WayfinderConfig::default(),
    )?;

    app.start().await;

    for query in ["Canteen", "A5 DEPSTAR BUILDING", "Hospital"] {
        println!("\n=== navigate({query}) ===");
        let outcome = app.navigate(query).await?;
        println!("outcome: {outcome:?}");
    }

    app.add_favorite("Canteen")?;
    println!("\nsuggestions for 'a': {:?}", app.suggest("a"));
    println!("suggestions for '':  {:?}", app.suggest(""));

    Ok(())
}
