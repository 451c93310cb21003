//! Navigation coordinator demonstration harness library.
//!
//! Contains the launch policies that drive the coordinator through its
//! lifecycle. The binary entry point is in main.rs.

pub mod scenario;

// Re-export commonly used types
pub use scenario::{run_scenario, LaunchPolicy};
