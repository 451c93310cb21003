//! Session lifecycle coordinator.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, warn};

use navcoord_core::{
    validate_waypoints, CoordinatorConfig, EngineError, Error, Result, RouteStatus, SessionId,
    SessionOptions, TermsDialogOptions, UpdateThreshold, Waypoint,
};
use navcoord_engine::{EngineSession, LocationAuthorization, NavigationEngine, Navigator};

use crate::events::CoordinatorEventSink;
use crate::state::CoordinatorState;

/// The session owned by the coordinator, at most one at a time.
struct ActiveSession {
    id: SessionId,
    handle: Arc<dyn EngineSession>,
    destinations_set: bool,
}

/// Coordinator state behind the entry-point mutex.
struct Inner {
    session: Option<ActiveSession>,

    /// Tag for in-flight route requests; results from a stale generation
    /// must not mutate coordinator state
    route_generation: u64,
}

/// Owns at most one navigation session and serializes its lifecycle:
/// terms acceptance, permission checks, session creation, route
/// calculation, guidance start/stop, cleanup.
///
/// All entry points funnel through one async mutex, so the coordinator is
/// exclusive and non-reentrant by construction. Construct one per engine;
/// there are no process-wide globals.
pub struct SessionCoordinator {
    engine: Arc<dyn NavigationEngine>,
    location: Arc<dyn LocationAuthorization>,
    config: CoordinatorConfig,
    inner: Mutex<Inner>,
}

impl SessionCoordinator {
    /// Create a coordinator with default configuration.
    pub fn new(
        engine: Arc<dyn NavigationEngine>,
        location: Arc<dyn LocationAuthorization>,
    ) -> Self {
        Self::with_config(engine, location, CoordinatorConfig::default())
    }

    /// Create a coordinator with custom configuration.
    pub fn with_config(
        engine: Arc<dyn NavigationEngine>,
        location: Arc<dyn LocationAuthorization>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            engine,
            location,
            config,
            inner: Mutex::new(Inner {
                session: None,
                route_generation: 0,
            }),
        }
    }

    /// Whether the process-wide terms flag is set. Pure query, no side
    /// effects.
    pub fn are_terms_accepted(&self) -> bool {
        self.engine.are_terms_accepted()
    }

    /// Present the engine's consent dialog and suspend until the user
    /// responds.
    ///
    /// Returns the new acceptance flag. No retries: a declined dialog
    /// simply leaves acceptance false.
    pub async fn show_terms_dialog(&self, options: TermsDialogOptions) -> Result<bool> {
        debug!("Showing terms dialog: title='{}'", options.title);
        let rx = self.engine.show_terms_dialog(options);
        let accepted = rx
            .await
            .map_err(|_| EngineError::new("terms dialog closed without a response"))?;
        info!("Terms dialog resolved: accepted={accepted}");
        Ok(accepted)
    }

    /// Create the navigation session, or reuse the existing one.
    ///
    /// Preconditions, checked in order: terms accepted
    /// ([`Error::TermsNotAccepted`]), then location authorization
    /// ([`Error::LocationPermissionMissing`]). A second call while a
    /// session exists returns the existing session's id instead of
    /// creating a duplicate, which would leak its listener registrations.
    pub async fn create_session(&self, options: SessionOptions) -> Result<SessionId> {
        let mut inner = self.inner.lock().await;

        if !self.engine.are_terms_accepted() {
            return Err(Error::TermsNotAccepted);
        }

        let permission = self.location.authorization_status();
        if !permission.allows_navigation() {
            return Err(Error::LocationPermissionMissing(permission));
        }

        if let Some(active) = inner.session.as_ref() {
            debug!("Session already exists, reusing: id={}", active.id);
            return Ok(active.id);
        }

        // The precondition check above should make `None` unreachable,
        // but the factory's contract allows it
        let handle = self
            .engine
            .create_session(options)
            .ok_or(Error::TermsNotAccepted)?;

        handle.set_started(true);

        let sink = Arc::new(CoordinatorEventSink::new());
        if let Some(navigator) = handle.navigator() {
            navigator.add_listener(sink.clone());
            navigator.set_stop_guidance_at_arrival(false);
            // Nothing here consumes these callbacks; silence them
            navigator.set_time_update_threshold(UpdateThreshold::Never);
            navigator.set_distance_update_threshold(UpdateThreshold::Never);
        }
        if let Some(provider) = handle.road_snapped_location_provider() {
            provider.add_listener(sink);
        }

        let id = SessionId::new();
        info!("Navigation session created: id={id}");
        inner.session = Some(ActiveSession {
            id,
            handle,
            destinations_set: false,
        });

        Ok(id)
    }

    /// Request a route to the given waypoints and await the outcome.
    ///
    /// Waypoints are validated first: an empty list yields
    /// [`RouteStatus::NoWaypoints`] and a list containing equal waypoints
    /// yields [`RouteStatus::DuplicateWaypoints`], without touching the
    /// engine. Otherwise the request is forwarded and the call suspends
    /// until the engine answers or the configured timeout expires
    /// ([`Error::RouteTimeout`]).
    ///
    /// A result arriving after a superseding call or a cleanup is stale
    /// and does not mutate coordinator state.
    pub async fn set_destinations(&self, waypoints: Vec<Waypoint>) -> Result<RouteStatus> {
        let (rx, generation) = {
            let mut inner = self.inner.lock().await;
            let navigator = Self::navigator(&inner)?;

            if let Some(status) = validate_waypoints(&waypoints) {
                debug!("Waypoint validation failed: {status:?}");
                return Ok(status);
            }

            inner.route_generation += 1;
            let generation = inner.route_generation;

            info!(
                "Requesting route: {} waypoints (generation {generation})",
                waypoints.len()
            );
            let (tx, rx) = oneshot::channel();
            navigator.set_destinations(waypoints, tx);
            (rx, generation)
        };

        // Lock released: the engine's callback must not have to wait on us
        let timeout_ms = self.config.route.timeout_ms;
        let status = match tokio::time::timeout(Duration::from_millis(timeout_ms), rx).await {
            Ok(Ok(status)) => status,
            // Engine dropped the callback without answering
            Ok(Err(_)) => RouteStatus::Canceled,
            Err(_) => {
                warn!("Route calculation timed out after {timeout_ms}ms");
                return Err(Error::RouteTimeout(timeout_ms));
            }
        };

        let mut inner = self.inner.lock().await;
        if inner.route_generation != generation {
            debug!("Discarding stale route result: {status:?} (generation {generation})");
            return Ok(status);
        }

        if let Some(active) = inner.session.as_mut() {
            active.destinations_set = status.is_ok();
        }
        info!("Route calculation finished: {status:?}");
        Ok(status)
    }

    /// Start turn-by-turn guidance.
    ///
    /// Engine failures propagate untranslated; this call is made
    /// faithfully even when the engine is known to misbehave downstream.
    pub async fn start_guidance(&self) -> Result<()> {
        let inner = self.inner.lock().await;
        let navigator = Self::navigator(&inner)?;
        info!("Starting guidance");
        navigator.set_guidance_active(true)?;
        Ok(())
    }

    /// Stop turn-by-turn guidance. Idempotent: stopping an already
    /// stopped session is not an error.
    pub async fn stop_guidance(&self) -> Result<()> {
        let inner = self.inner.lock().await;
        let navigator = Self::navigator(&inner)?;
        info!("Stopping guidance");
        navigator.set_guidance_active(false)?;
        Ok(())
    }

    /// Whether guidance is currently running.
    pub async fn is_guidance_running(&self) -> Result<bool> {
        let inner = self.inner.lock().await;
        let navigator = Self::navigator(&inner)?;
        Ok(navigator.is_guidance_active())
    }

    /// Tear the session down and release it.
    ///
    /// Best-effort: each step that fails is logged and the remaining
    /// steps still run, since leaving a half-released session behind is
    /// worse than skipping one step.
    pub async fn cleanup(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let active = inner.session.take().ok_or(Error::SessionNotInitialized)?;

        // Invalidate any in-flight route callback
        inner.route_generation += 1;

        info!("Cleaning up session: id={}", active.id);
        let handle = active.handle;

        if let Some(simulator) = handle.location_simulator() {
            if let Err(e) = simulator.stop_simulation() {
                warn!("Cleanup: failed to stop location simulation: {e}");
            }
        }

        if let Some(navigator) = handle.navigator() {
            if let Err(e) = navigator.clear_destinations() {
                warn!("Cleanup: failed to clear destinations: {e}");
            }
        }

        if let Some(provider) = handle.road_snapped_location_provider() {
            if let Err(e) = provider.remove_listeners() {
                warn!("Cleanup: failed to remove road-snapped location listeners: {e}");
            }
        }

        if let Some(navigator) = handle.navigator() {
            if let Err(e) = navigator.set_guidance_active(false) {
                warn!("Cleanup: failed to deactivate guidance: {e}");
            }
            navigator.clear_listeners();
        }

        handle.set_started(false);
        // Dropping the handle releases the engine session
        Ok(())
    }

    /// Clear the process-wide terms acceptance flag.
    ///
    /// Refused while a session exists: acceptance must not be revoked out
    /// from under an active session.
    pub async fn reset_terms_accepted(&self) -> Result<()> {
        let inner = self.inner.lock().await;
        if inner.session.is_some() {
            return Err(Error::TermsResetNotAllowed);
        }
        info!("Resetting terms acceptance");
        self.engine.reset_terms_accepted();
        Ok(())
    }

    /// The authoritative lifecycle state.
    pub async fn state(&self) -> CoordinatorState {
        let inner = self.inner.lock().await;
        match inner.session.as_ref() {
            None => CoordinatorState::Uninitialized,
            Some(active) => CoordinatorState::SessionActive {
                session_id: active.id,
                route_set: active.destinations_set,
                guidance_running: active
                    .handle
                    .navigator()
                    .map(|n| n.is_guidance_active())
                    .unwrap_or(false),
            },
        }
    }

    /// Identifier of the live session, if any.
    pub async fn session_id(&self) -> Option<SessionId> {
        let inner = self.inner.lock().await;
        inner.session.as_ref().map(|active| active.id)
    }

    /// The active session's navigator, or `SessionNotInitialized`.
    fn navigator(inner: &Inner) -> Result<Arc<dyn Navigator>> {
        let active = inner.session.as_ref().ok_or(Error::SessionNotInitialized)?;
        active
            .handle
            .navigator()
            .ok_or(Error::SessionNotInitialized)
    }
}
