//! Error types for the navigation session coordinator.

use thiserror::Error;

use crate::LocationPermission;

/// Error raised by the external navigation engine.
///
/// The coordinator never translates these; they pass through to the caller
/// untouched via [`Error::Engine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("navigation engine error: {0}")]
pub struct EngineError(pub String);

impl EngineError {
    /// Create a new engine error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result type alias for engine-level calls.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Main error type for coordinator operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Session creation attempted before terms acceptance, or the engine
    /// factory unexpectedly returned no session
    #[error("Terms and conditions have not been accepted")]
    TermsNotAccepted,

    /// Session creation attempted without OS location authorization
    #[error("Location permission missing (status: {0})")]
    LocationPermissionMissing(LocationPermission),

    /// Session-scoped operation invoked with no active session
    #[error("Session not initialized")]
    SessionNotInitialized,

    /// Terms reset attempted while a session is active
    #[error("Terms acceptance cannot be reset while a session is active")]
    TermsResetNotAllowed,

    /// Route calculation did not complete in time
    #[error("Route calculation timed out after {0}ms")]
    RouteTimeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unmodeled downstream engine failure, propagated as-is
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
