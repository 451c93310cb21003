//! Capability traits the coordinator requires from a navigation engine.
//!
//! The engine is an opaque collaborator: the coordinator sequences calls into
//! this surface and owns nothing behind it. Asynchronous results (terms
//! dialog response, route calculation outcome) are delivered over one-shot
//! channels so a caller can suspend on them without the engine dictating an
//! executor.

use std::sync::Arc;

use tokio::sync::oneshot;

use navcoord_core::{
    EngineResult, LatLng, LocationPermission, RouteStatus, SessionOptions, SpeedAlertSeverity,
    TermsDialogOptions, UpdateThreshold, Waypoint,
};

/// Entry point of the external navigation engine.
pub trait NavigationEngine: Send + Sync {
    /// Whether the process-wide terms-and-conditions flag is set.
    fn are_terms_accepted(&self) -> bool;

    /// Present the consent dialog to the user.
    ///
    /// The returned receiver resolves to the new acceptance flag once the
    /// user responds. A declined dialog resolves to `false`; there is no
    /// retry built in.
    fn show_terms_dialog(&self, options: TermsDialogOptions) -> oneshot::Receiver<bool>;

    /// Clear the process-wide terms-and-conditions flag.
    fn reset_terms_accepted(&self);

    /// Request a new navigation session.
    ///
    /// Returns `None` when terms are unaccepted.
    fn create_session(&self, options: SessionOptions) -> Option<Arc<dyn EngineSession>>;
}

/// OS location authorization, read-only.
///
/// The coordinator never requests permission; it only observes the status
/// the host reports.
pub trait LocationAuthorization: Send + Sync {
    /// Current authorization status.
    fn authorization_status(&self) -> LocationPermission;
}

/// A live navigation session handle owned by the engine.
pub trait EngineSession: Send + Sync {
    /// Mark the session started or stopped.
    fn set_started(&self, started: bool);

    /// Whether the session is currently marked started.
    fn is_started(&self) -> bool;

    /// The session's navigator, if one is attached.
    fn navigator(&self) -> Option<Arc<dyn Navigator>>;

    /// The session's road-snapped location provider, if available.
    fn road_snapped_location_provider(&self) -> Option<Arc<dyn RoadSnappedLocationProvider>>;

    /// The session's location simulator, if available.
    fn location_simulator(&self) -> Option<Arc<dyn LocationSimulator>>;
}

/// The engine's turn-by-turn navigator.
pub trait Navigator: Send + Sync {
    /// Whether guidance is currently active.
    fn is_guidance_active(&self) -> bool;

    /// Toggle guidance.
    ///
    /// Fallible: a downstream engine defect surfaces here and must reach the
    /// caller untranslated.
    fn set_guidance_active(&self, active: bool) -> EngineResult<()>;

    /// Whether the engine stops guidance automatically on arrival.
    fn set_stop_guidance_at_arrival(&self, stop: bool);

    /// How often the remaining-time callback fires (seconds).
    fn set_time_update_threshold(&self, threshold: UpdateThreshold);

    /// How often the remaining-distance callback fires (meters).
    fn set_distance_update_threshold(&self, threshold: UpdateThreshold);

    /// Start an asynchronous route calculation to the given waypoints.
    ///
    /// Returns immediately; the outcome is delivered exactly once on `done`.
    /// Dropping the sender without sending signals that the engine abandoned
    /// the request.
    fn set_destinations(&self, waypoints: Vec<Waypoint>, done: oneshot::Sender<RouteStatus>);

    /// Discard any previously set destinations.
    fn clear_destinations(&self) -> EngineResult<()>;

    /// Register a navigation event listener.
    fn add_listener(&self, listener: Arc<dyn NavigationListener>);

    /// Unregister all navigation event listeners.
    fn clear_listeners(&self);
}

/// Provider of locations snapped to the road network.
pub trait RoadSnappedLocationProvider: Send + Sync {
    /// Register a road-snapped location listener.
    fn add_listener(&self, listener: Arc<dyn RoadSnappedLocationListener>);

    /// Unregister all road-snapped location listeners.
    fn remove_listeners(&self) -> EngineResult<()>;
}

/// Driver of simulated vehicle movement along the route.
pub trait LocationSimulator: Send + Sync {
    /// Stop any running location simulation.
    fn stop_simulation(&self) -> EngineResult<()>;
}

/// Sink for navigation events emitted by the [`Navigator`].
///
/// Deliberately without default method bodies: an implementor must conform
/// to the whole surface explicitly, even if every body is a no-op.
pub trait NavigationListener: Send + Sync {
    /// The vehicle arrived at a waypoint.
    fn on_arrival(&self, waypoint: &Waypoint);

    /// The active route changed.
    fn on_route_changed(&self);

    /// Remaining time (seconds) or distance (meters) to the destination changed.
    fn on_remaining_time_or_distance_changed(&self, remaining_secs: f64, remaining_meters: f64);

    /// The speeding alert severity changed.
    fn on_speed_alert_severity_changed(&self, severity: SpeedAlertSeverity);

    /// Turn-by-turn navigation info was updated.
    fn on_nav_info_updated(&self);

    /// A guidance prompt became visible.
    fn on_prompt_shown(&self);

    /// A guidance prompt was dismissed.
    fn on_prompt_dismissed(&self);
}

/// Sink for road-snapped location updates.
pub trait RoadSnappedLocationListener: Send + Sync {
    /// A new road-snapped location is available.
    fn on_location_updated(&self, location: LatLng);
}
