//! Waypoint and coordinate types for route requests.

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl LatLng {
    /// Create a new coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// A destination point supplied to route calculation.
///
/// Equality is structural over all fields; the engine treats two equal
/// waypoints in one request as an error rather than deduplicating them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Geographic position of the destination
    pub position: LatLng,

    /// Human-readable title shown in guidance
    pub title: String,

    /// Optional place identifier from the engine's places database
    pub place_id: Option<String>,
}

impl Waypoint {
    /// Create a waypoint from a coordinate pair and title.
    pub fn new(position: LatLng, title: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
            place_id: None,
        }
    }

    /// Create a waypoint backed by a place identifier.
    pub fn with_place_id(position: LatLng, title: impl Into<String>, place_id: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
            place_id: Some(place_id.into()),
        }
    }
}
