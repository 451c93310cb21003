//! # Navigation Coordinator Harness
//!
//! Drives the session lifecycle coordinator against the simulated
//! navigation engine, reproducing the interactive call sequences.
//!
//! ## Usage
//!
//! ```text
//! navcoord [--auto] [--show-terms] [--config <path>]
//! ```
//!
//! - `--auto`: chain create, route and guidance automatically after a
//!   fixed delay instead of the two-step sequence
//! - `--show-terms`: start with terms unaccepted so the consent dialog
//!   flow runs
//! - `--config <path>`: load coordinator configuration from a YAML file
//!
//! ## Architecture
//!
//! This is Layer 1 - the harness binary that ties together:
//! - navcoord-core: Core types and configuration
//! - navcoord-engine: Engine capability surface and simulator
//! - navcoord-session: Session lifecycle coordination

use std::sync::Arc;
use std::time::Duration;

use navcoord::{run_scenario, LaunchPolicy};
use navcoord_core::{
    CoordinatorConfig, LatLng, LocationPermission, SessionOptions, TermsDialogOptions, Waypoint,
};
use navcoord_engine::{
    FixedLocationAuthorization, NavigationEngine, SimulatedEngine, SimulatedEngineConfig,
};
use navcoord_session::SessionCoordinator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let auto_chain = args.iter().any(|arg| arg == "--auto");
    let show_terms = args.iter().any(|arg| arg == "--show-terms");
    let config_path = args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1));

    let config = match config_path {
        Some(path) => CoordinatorConfig::from_file(path)?,
        None => CoordinatorConfig::default(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let policy = if auto_chain {
        LaunchPolicy::AutoChain {
            delay: Duration::from_millis(500),
        }
    } else {
        LaunchPolicy::TwoStep
    };
    tracing::info!("Navigation coordinator harness starting: policy={policy:?}");

    let engine = Arc::new(SimulatedEngine::with_config(SimulatedEngineConfig {
        terms_accepted: !show_terms,
        dialog_answer: true,
        route_latency: Duration::from_millis(300),
    }));
    let location = Arc::new(FixedLocationAuthorization::new(
        LocationPermission::AuthorizedWhenInUse,
    ));

    let terms = TermsDialogOptions {
        title: config.terms.title.clone(),
        company_name: config.terms.company_name.clone(),
        disclaimer_only: config.terms.disclaimer_only,
    };
    let options = SessionOptions {
        abnormal_termination_reporting_enabled: config.session.abnormal_termination_reporting,
    };

    let coordinator = SessionCoordinator::with_config(
        Arc::clone(&engine) as Arc<dyn NavigationEngine>,
        location,
        config,
    );

    let waypoints = vec![
        Waypoint::new(LatLng::new(37.4220, -122.0841), "Amphitheatre Parkway"),
        Waypoint::new(LatLng::new(37.7936, -122.3930), "Ferry Building"),
    ];

    run_scenario(&coordinator, policy, waypoints, terms, options).await?;

    // Let guidance "run" briefly before tearing down
    tokio::time::sleep(Duration::from_secs(1)).await;
    coordinator.stop_guidance().await?;
    coordinator.cleanup().await?;

    tracing::info!("Harness shutting down: state={:?}", coordinator.state().await);
    Ok(())
}
