//! # navcoord-engine
//!
//! Navigation engine capability surface for the session coordinator.
//!
//! This crate provides:
//! - The trait surface the coordinator requires from an external navigation
//!   engine (sessions, navigator, location providers, event listeners)
//! - A deterministic simulated engine implementing that surface for the
//!   demonstration harness and the test suites
//!
//! ## Architecture
//!
//! This is Layer 3 in the architecture - it depends on navcoord-core and
//! provides the engine boundary the coordinator orchestrates against. The
//! real SDK is never linked here; callers supply any implementation of
//! [`NavigationEngine`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sim;
pub mod traits;

// Re-export commonly used types
pub use sim::{FixedLocationAuthorization, SimulatedEngine, SimulatedEngineConfig};
pub use traits::{
    EngineSession, LocationAuthorization, LocationSimulator, NavigationEngine, NavigationListener,
    Navigator, RoadSnappedLocationListener, RoadSnappedLocationProvider,
};
