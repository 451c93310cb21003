//! Deterministic simulated navigation engine.
//!
//! Implements the full capability surface in-process so the coordinator can
//! be exercised end-to-end without the real SDK. Behavior is scriptable:
//! route outcomes, response latency, session denial, and an injectable
//! guidance fault that reproduces a downstream engine failure.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, info};

use navcoord_core::{
    validate_waypoints, EngineError, EngineResult, LatLng, LocationPermission, RouteStatus,
    SessionOptions, TermsDialogOptions, UpdateThreshold, Waypoint,
};

use crate::traits::{
    EngineSession, LocationAuthorization, LocationSimulator, NavigationEngine, NavigationListener,
    Navigator, RoadSnappedLocationListener, RoadSnappedLocationProvider,
};

/// Configuration for the simulated engine.
#[derive(Debug, Clone)]
pub struct SimulatedEngineConfig {
    /// Initial state of the process-wide terms acceptance flag
    pub terms_accepted: bool,

    /// How the simulated user answers the consent dialog
    pub dialog_answer: bool,

    /// Simulated network latency for route calculation
    pub route_latency: Duration,
}

impl Default for SimulatedEngineConfig {
    fn default() -> Self {
        Self {
            terms_accepted: false,
            dialog_answer: true,
            route_latency: Duration::ZERO,
        }
    }
}

/// Shared behavior knobs, cloned into every session the engine creates.
#[derive(Debug, Default)]
struct Knobs {
    /// Scripted route outcomes, consumed front to back; empty means `Ok`
    route_script: Mutex<VecDeque<RouteStatus>>,

    /// When set, `set_guidance_active(true)` fails with this message
    guidance_fault: Mutex<Option<String>>,

    /// When set, route requests are held open and never answered
    swallow_route_requests: AtomicBool,

    /// When set, cleanup-path engine calls fail
    cleanup_faults: AtomicBool,
}

/// Deterministic in-process navigation engine.
pub struct SimulatedEngine {
    config: SimulatedEngineConfig,
    terms_accepted: AtomicBool,
    deny_session: AtomicBool,
    sessions_created: AtomicUsize,
    knobs: Arc<Knobs>,
    last_session: Mutex<Option<Arc<SimulatedSession>>>,
}

impl SimulatedEngine {
    /// Create a simulated engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(SimulatedEngineConfig::default())
    }

    /// Create a simulated engine with custom configuration.
    pub fn with_config(config: SimulatedEngineConfig) -> Self {
        Self {
            terms_accepted: AtomicBool::new(config.terms_accepted),
            deny_session: AtomicBool::new(false),
            sessions_created: AtomicUsize::new(0),
            knobs: Arc::new(Knobs::default()),
            last_session: Mutex::new(None),
            config,
        }
    }

    /// Queue the outcome of the next route calculation.
    pub fn push_route_status(&self, status: RouteStatus) {
        self.knobs.route_script.lock().unwrap().push_back(status);
    }

    /// Make `set_guidance_active(true)` fail with the given message.
    pub fn inject_guidance_fault(&self, message: impl Into<String>) {
        *self.knobs.guidance_fault.lock().unwrap() = Some(message.into());
    }

    /// Hold route requests open forever so callers can observe timeouts.
    pub fn swallow_route_requests(&self) {
        self.knobs
            .swallow_route_requests
            .store(true, Ordering::SeqCst);
    }

    /// Make cleanup-path engine calls (stop simulation, clear destinations,
    /// remove listeners) fail.
    pub fn inject_cleanup_faults(&self) {
        self.knobs.cleanup_faults.store(true, Ordering::SeqCst);
    }

    /// Make the session factory return `None` regardless of terms state.
    pub fn set_deny_session(&self, deny: bool) {
        self.deny_session.store(deny, Ordering::SeqCst);
    }

    /// Number of sessions the factory has handed out.
    pub fn sessions_created(&self) -> usize {
        self.sessions_created.load(Ordering::SeqCst)
    }

    /// The most recently created session, for white-box assertions.
    pub fn last_session(&self) -> Option<Arc<SimulatedSession>> {
        self.last_session.lock().unwrap().clone()
    }
}

impl Default for SimulatedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationEngine for SimulatedEngine {
    fn are_terms_accepted(&self) -> bool {
        self.terms_accepted.load(Ordering::SeqCst)
    }

    fn show_terms_dialog(&self, options: TermsDialogOptions) -> oneshot::Receiver<bool> {
        let answer = self.config.dialog_answer;
        debug!(
            "Showing terms dialog: title='{}', disclaimer_only={}, answer={}",
            options.title, options.disclaimer_only, answer
        );
        if answer {
            self.terms_accepted.store(true, Ordering::SeqCst);
        }

        let (tx, rx) = oneshot::channel();
        let _ = tx.send(answer);
        rx
    }

    fn reset_terms_accepted(&self) {
        debug!("Resetting terms acceptance");
        self.terms_accepted.store(false, Ordering::SeqCst);
    }

    fn create_session(&self, options: SessionOptions) -> Option<Arc<dyn EngineSession>> {
        if !self.are_terms_accepted() || self.deny_session.load(Ordering::SeqCst) {
            return None;
        }

        let session = Arc::new(SimulatedSession::new(
            Arc::clone(&self.knobs),
            self.config.route_latency,
        ));
        self.sessions_created.fetch_add(1, Ordering::SeqCst);
        *self.last_session.lock().unwrap() = Some(Arc::clone(&session));

        info!(
            "Simulated session created: abnormal_termination_reporting={}",
            options.abnormal_termination_reporting_enabled
        );
        Some(session)
    }
}

/// A simulated navigation session.
pub struct SimulatedSession {
    started: AtomicBool,
    navigator: Arc<SimulatedNavigator>,
    provider: Arc<SimulatedLocationProvider>,
    simulator: Arc<SimulatedLocationSimulator>,
}

impl SimulatedSession {
    fn new(knobs: Arc<Knobs>, route_latency: Duration) -> Self {
        Self {
            started: AtomicBool::new(false),
            navigator: Arc::new(SimulatedNavigator::new(Arc::clone(&knobs), route_latency)),
            provider: Arc::new(SimulatedLocationProvider::new(Arc::clone(&knobs))),
            simulator: Arc::new(SimulatedLocationSimulator::new(knobs)),
        }
    }

    /// Number of navigation listeners currently registered.
    pub fn navigation_listener_count(&self) -> usize {
        self.navigator.listeners.lock().unwrap().len()
    }

    /// Number of road-snapped location listeners currently registered.
    pub fn location_listener_count(&self) -> usize {
        self.provider.listeners.lock().unwrap().len()
    }

    /// Destinations currently held by the navigator.
    pub fn destinations(&self) -> Vec<Waypoint> {
        self.navigator.destinations.lock().unwrap().clone()
    }

    /// Whether `stop_simulation` has been called.
    pub fn simulation_stopped(&self) -> bool {
        self.simulator.stopped.load(Ordering::SeqCst)
    }
}

impl EngineSession for SimulatedSession {
    fn set_started(&self, started: bool) {
        self.started.store(started, Ordering::SeqCst);
    }

    fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    fn navigator(&self) -> Option<Arc<dyn Navigator>> {
        Some(Arc::clone(&self.navigator) as Arc<dyn Navigator>)
    }

    fn road_snapped_location_provider(&self) -> Option<Arc<dyn RoadSnappedLocationProvider>> {
        Some(Arc::clone(&self.provider) as Arc<dyn RoadSnappedLocationProvider>)
    }

    fn location_simulator(&self) -> Option<Arc<dyn LocationSimulator>> {
        Some(Arc::clone(&self.simulator) as Arc<dyn LocationSimulator>)
    }
}

/// A simulated navigator.
struct SimulatedNavigator {
    knobs: Arc<Knobs>,
    route_latency: Duration,
    guidance_active: AtomicBool,
    stop_at_arrival: AtomicBool,
    time_threshold: Mutex<UpdateThreshold>,
    distance_threshold: Mutex<UpdateThreshold>,
    destinations: Mutex<Vec<Waypoint>>,
    listeners: Mutex<Vec<Arc<dyn NavigationListener>>>,
}

impl SimulatedNavigator {
    fn new(knobs: Arc<Knobs>, route_latency: Duration) -> Self {
        Self {
            knobs,
            route_latency,
            guidance_active: AtomicBool::new(false),
            // The real engine stops guidance at arrival unless told otherwise
            stop_at_arrival: AtomicBool::new(true),
            time_threshold: Mutex::new(UpdateThreshold::Every(1)),
            distance_threshold: Mutex::new(UpdateThreshold::Every(100)),
            destinations: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }
}

impl Navigator for SimulatedNavigator {
    fn is_guidance_active(&self) -> bool {
        self.guidance_active.load(Ordering::SeqCst)
    }

    fn set_guidance_active(&self, active: bool) -> EngineResult<()> {
        if active {
            if let Some(message) = self.knobs.guidance_fault.lock().unwrap().clone() {
                return Err(EngineError::new(message));
            }
        }
        self.guidance_active.store(active, Ordering::SeqCst);
        Ok(())
    }

    fn set_stop_guidance_at_arrival(&self, stop: bool) {
        self.stop_at_arrival.store(stop, Ordering::SeqCst);
    }

    fn set_time_update_threshold(&self, threshold: UpdateThreshold) {
        *self.time_threshold.lock().unwrap() = threshold;
    }

    fn set_distance_update_threshold(&self, threshold: UpdateThreshold) {
        *self.distance_threshold.lock().unwrap() = threshold;
    }

    fn set_destinations(&self, waypoints: Vec<Waypoint>, done: oneshot::Sender<RouteStatus>) {
        if self.knobs.swallow_route_requests.load(Ordering::SeqCst) {
            debug!("Swallowing route request with {} waypoints", waypoints.len());
            tokio::spawn(async move {
                // Hold the sender so the caller's receiver never resolves
                tokio::time::sleep(Duration::from_secs(3600)).await;
                drop(done);
            });
            return;
        }

        let status = validate_waypoints(&waypoints).unwrap_or_else(|| {
            self.knobs
                .route_script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(RouteStatus::Ok)
        });

        if status == RouteStatus::Ok {
            *self.destinations.lock().unwrap() = waypoints;
        }

        debug!("Route calculation resolving with {:?}", status);
        let latency = self.route_latency;
        tokio::spawn(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let _ = done.send(status);
        });
    }

    fn clear_destinations(&self) -> EngineResult<()> {
        if self.knobs.cleanup_faults.load(Ordering::SeqCst) {
            return Err(EngineError::new("clear_destinations rejected"));
        }
        self.destinations.lock().unwrap().clear();
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn NavigationListener>) {
        self.listeners.lock().unwrap().push(listener);
    }

    fn clear_listeners(&self) {
        self.listeners.lock().unwrap().clear();
    }
}

/// A simulated road-snapped location provider.
struct SimulatedLocationProvider {
    knobs: Arc<Knobs>,
    listeners: Mutex<Vec<Arc<dyn RoadSnappedLocationListener>>>,
}

impl SimulatedLocationProvider {
    fn new(knobs: Arc<Knobs>) -> Self {
        Self {
            knobs,
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Deliver a location update to every registered listener.
    #[allow(dead_code)]
    fn publish(&self, location: LatLng) {
        for listener in self.listeners.lock().unwrap().iter() {
            listener.on_location_updated(location);
        }
    }
}

impl RoadSnappedLocationProvider for SimulatedLocationProvider {
    fn add_listener(&self, listener: Arc<dyn RoadSnappedLocationListener>) {
        self.listeners.lock().unwrap().push(listener);
    }

    fn remove_listeners(&self) -> EngineResult<()> {
        if self.knobs.cleanup_faults.load(Ordering::SeqCst) {
            return Err(EngineError::new("remove_listeners rejected"));
        }
        self.listeners.lock().unwrap().clear();
        Ok(())
    }
}

/// A simulated location simulator.
struct SimulatedLocationSimulator {
    knobs: Arc<Knobs>,
    stopped: AtomicBool,
}

impl SimulatedLocationSimulator {
    fn new(knobs: Arc<Knobs>) -> Self {
        Self {
            knobs,
            stopped: AtomicBool::new(false),
        }
    }
}

impl LocationSimulator for SimulatedLocationSimulator {
    fn stop_simulation(&self) -> EngineResult<()> {
        if self.knobs.cleanup_faults.load(Ordering::SeqCst) {
            return Err(EngineError::new("stop_simulation rejected"));
        }
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Location authorization that reports a fixed, settable status.
pub struct FixedLocationAuthorization {
    status: Mutex<LocationPermission>,
}

impl FixedLocationAuthorization {
    /// Create an authorization source reporting the given status.
    pub fn new(status: LocationPermission) -> Self {
        Self {
            status: Mutex::new(status),
        }
    }

    /// Change the reported status.
    pub fn set(&self, status: LocationPermission) {
        *self.status.lock().unwrap() = status;
    }
}

impl LocationAuthorization for FixedLocationAuthorization {
    fn authorization_status(&self) -> LocationPermission {
        *self.status.lock().unwrap()
    }
}
