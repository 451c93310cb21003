//! Location permission states as reported by the host OS.

use serde::{Deserialize, Serialize};

/// OS-level location authorization status.
///
/// The coordinator only reads this state; requesting permission is the
/// caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationPermission {
    /// The user has not yet made a choice
    NotDetermined,
    /// The user explicitly denied access
    Denied,
    /// Access is restricted by system policy (e.g. parental controls)
    Restricted,
    /// Authorized while the application is in use
    AuthorizedWhenInUse,
    /// Authorized at all times
    AuthorizedAlways,
}

impl LocationPermission {
    /// Whether this status is sufficient for navigation session creation.
    pub fn allows_navigation(&self) -> bool {
        matches!(
            self,
            LocationPermission::AuthorizedWhenInUse | LocationPermission::AuthorizedAlways
        )
    }
}

impl std::fmt::Display for LocationPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LocationPermission::NotDetermined => "not-determined",
            LocationPermission::Denied => "denied",
            LocationPermission::Restricted => "restricted",
            LocationPermission::AuthorizedWhenInUse => "authorized-when-in-use",
            LocationPermission::AuthorizedAlways => "authorized-always",
        };
        write!(f, "{s}")
    }
}
