//! Route status codes for destination-calculation outcomes.

use serde::{Deserialize, Serialize};

use crate::Waypoint;

/// Outcome of one asynchronous destination-calculation request.
///
/// Delivered exactly once per `set_destinations` call; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteStatus {
    /// A route to the destinations was found
    Ok,
    /// Unspecified internal failure in the route engine
    InternalError,
    /// No route exists between the origin and the destinations
    NoRouteFound,
    /// The route request could not reach the network
    NetworkError,
    /// The API key's routing quota is exhausted
    QuotaExceeded,
    /// The API key is not authorized for navigation
    ApiKeyNotAuthorized,
    /// The request was canceled before completion
    Canceled,
    /// The request contained the same waypoint more than once
    DuplicateWaypoints,
    /// The request contained no waypoints
    NoWaypoints,
    /// The device location could not be determined
    LocationUnavailable,
    /// A waypoint in the request was invalid
    WaypointError,
    /// The requested travel mode is not supported for these waypoints
    TravelModeUnsupported,
}

impl RouteStatus {
    /// Whether this status means a usable route was produced.
    pub fn is_ok(&self) -> bool {
        matches!(self, RouteStatus::Ok)
    }
}

/// Validate a waypoint list the way the route engine does.
///
/// Returns `Some(RouteStatus::NoWaypoints)` for an empty list and
/// `Some(RouteStatus::DuplicateWaypoints)` when any two waypoints compare
/// equal. Returns `None` when the list passes validation. Duplicates are
/// reported, never silently removed.
pub fn validate_waypoints(waypoints: &[Waypoint]) -> Option<RouteStatus> {
    if waypoints.is_empty() {
        return Some(RouteStatus::NoWaypoints);
    }

    for (i, a) in waypoints.iter().enumerate() {
        if waypoints[i + 1..].iter().any(|b| a == b) {
            return Some(RouteStatus::DuplicateWaypoints);
        }
    }

    None
}
