//! Session types for navigation session management.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a navigation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Options for creating a navigation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Whether the engine should report abnormal SDK terminations
    pub abnormal_termination_reporting_enabled: bool,
}

impl SessionOptions {
    /// Create session options with abnormal-termination reporting enabled.
    pub fn with_reporting() -> Self {
        Self {
            abnormal_termination_reporting_enabled: true,
        }
    }
}

/// Options for the engine's terms-and-conditions dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsDialogOptions {
    /// Dialog title
    pub title: String,
    /// Company name shown in the consent text
    pub company_name: String,
    /// Show only the disclaimer, without the full terms text
    pub disclaimer_only: bool,
}

impl Default for TermsDialogOptions {
    fn default() -> Self {
        Self {
            title: "Terms and Conditions".to_string(),
            company_name: String::new(),
            disclaimer_only: false,
        }
    }
}

/// Threshold controlling how often the engine fires a periodic callback.
///
/// The unit depends on the callback being configured: seconds for time
/// updates, meters for distance updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateThreshold {
    /// Suppress the callback entirely
    Never,
    /// Fire at most once per interval
    Every(u64),
}

/// Severity of a speeding alert reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedAlertSeverity {
    /// Vehicle is not speeding
    NotSpeeding,
    /// Minor speeding over the limit
    Minor,
    /// Major speeding over the limit
    Major,
}
