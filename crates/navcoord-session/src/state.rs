//! Authoritative coordinator state exposed to callers.

use navcoord_core::SessionId;

/// Snapshot of the coordinator's lifecycle state.
///
/// Callers query this instead of tracking shadow flags of their own; the
/// coordinator is the single source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No session exists
    Uninitialized,
    /// A session is active
    SessionActive {
        /// Identifier of the live session
        session_id: SessionId,
        /// Whether a route has been calculated and accepted
        route_set: bool,
        /// Whether turn-by-turn guidance is running
        guidance_running: bool,
    },
}

impl CoordinatorState {
    /// Whether a session currently exists.
    pub fn has_session(&self) -> bool {
        matches!(self, CoordinatorState::SessionActive { .. })
    }
}
