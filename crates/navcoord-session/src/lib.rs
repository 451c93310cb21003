//! # navcoord-session
//!
//! Session lifecycle coordination for the navigation engine.
//!
//! This crate provides:
//! - The [`SessionCoordinator`], owning at most one live navigation session
//! - Precondition enforcement (terms acceptance, location permission)
//! - Serialized sequencing of create / route / guidance / cleanup
//! - The no-op event sink satisfying the engine's listener contracts
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on navcoord-core and
//! navcoord-engine and orchestrates the engine's capability surface.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coordinator;
pub mod events;
pub mod state;

// Re-export commonly used types
pub use coordinator::SessionCoordinator;
pub use events::CoordinatorEventSink;
pub use state::CoordinatorState;
