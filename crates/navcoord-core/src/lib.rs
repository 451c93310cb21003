//! # navcoord-core
//!
//! Core types for the navigation session coordinator.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other navcoord crates. It provides:
//!
//! - Waypoint and coordinate types for route requests
//! - Route status codes for destination-calculation outcomes
//! - Location permission states
//! - Session types (SessionId, SessionOptions, update thresholds)
//! - Error types
//! - Coordinator configuration
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other navcoord crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod config;
pub mod error;
pub mod permission;
pub mod route;
pub mod session;
pub mod waypoint;

// Re-export commonly used types
pub use config::{CoordinatorConfig, RouteSettings, SessionSettings, TermsSettings};
pub use error::{EngineError, EngineResult, Error, Result};
pub use permission::LocationPermission;
pub use route::{validate_waypoints, RouteStatus};
pub use session::{
    SessionId, SessionOptions, SpeedAlertSeverity, TermsDialogOptions, UpdateThreshold,
};
pub use waypoint::{LatLng, Waypoint};
