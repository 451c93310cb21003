//! No-op event sink registered with the engine on session creation.

use navcoord_engine::{NavigationListener, RoadSnappedLocationListener};

use navcoord_core::{LatLng, SpeedAlertSeverity, Waypoint};

/// Event sink the coordinator registers with the navigator and the
/// road-snapped location provider.
///
/// Conformance to the listener traits is required by the engine contract,
/// but none of the events currently drive coordinator state; every body is
/// deliberately empty. Future event handling plugs in here.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinatorEventSink;

impl CoordinatorEventSink {
    /// Create a new event sink.
    pub fn new() -> Self {
        Self
    }
}

impl NavigationListener for CoordinatorEventSink {
    fn on_arrival(&self, _waypoint: &Waypoint) {}

    fn on_route_changed(&self) {}

    fn on_remaining_time_or_distance_changed(&self, _remaining_secs: f64, _remaining_meters: f64) {
    }

    fn on_speed_alert_severity_changed(&self, _severity: SpeedAlertSeverity) {}

    fn on_nav_info_updated(&self) {}

    fn on_prompt_shown(&self) {}

    fn on_prompt_dismissed(&self) {}
}

impl RoadSnappedLocationListener for CoordinatorEventSink {
    fn on_location_updated(&self, _location: LatLng) {}
}
