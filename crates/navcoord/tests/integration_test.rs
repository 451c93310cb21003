//! Integration tests for the harness launch policies.

use std::sync::Arc;
use std::time::Duration;

use navcoord::{run_scenario, LaunchPolicy};
use navcoord_core::{
    Error, LatLng, LocationPermission, RouteStatus, SessionOptions, TermsDialogOptions, Waypoint,
};
use navcoord_engine::{
    FixedLocationAuthorization, NavigationEngine, SimulatedEngine, SimulatedEngineConfig,
};
use navcoord_session::SessionCoordinator;

fn demo_waypoints() -> Vec<Waypoint> {
    vec![
        Waypoint::new(LatLng::new(37.4220, -122.0841), "Start"),
        Waypoint::new(LatLng::new(37.7936, -122.3930), "Finish"),
    ]
}

fn setup(terms_accepted: bool, dialog_answer: bool) -> (Arc<SimulatedEngine>, SessionCoordinator) {
    let engine = Arc::new(SimulatedEngine::with_config(SimulatedEngineConfig {
        terms_accepted,
        dialog_answer,
        route_latency: Duration::ZERO,
    }));
    let location = Arc::new(FixedLocationAuthorization::new(
        LocationPermission::AuthorizedWhenInUse,
    ));
    let coordinator =
        SessionCoordinator::new(Arc::clone(&engine) as Arc<dyn NavigationEngine>, location);
    (engine, coordinator)
}

#[tokio::test]
async fn test_two_step_policy_reaches_guidance() {
    let (_engine, coordinator) = setup(true, true);

    run_scenario(
        &coordinator,
        LaunchPolicy::TwoStep,
        demo_waypoints(),
        TermsDialogOptions::default(),
        SessionOptions::default(),
    )
    .await
    .unwrap();

    assert!(coordinator.is_guidance_running().await.unwrap());
}

#[tokio::test]
async fn test_auto_chain_policy_reaches_guidance() {
    let (_engine, coordinator) = setup(true, true);

    run_scenario(
        &coordinator,
        LaunchPolicy::AutoChain {
            delay: Duration::from_millis(10),
        },
        demo_waypoints(),
        TermsDialogOptions::default(),
        SessionOptions::with_reporting(),
    )
    .await
    .unwrap();

    assert!(coordinator.is_guidance_running().await.unwrap());
}

#[tokio::test]
async fn test_scenario_shows_terms_dialog_when_needed() {
    let (engine, coordinator) = setup(false, true);

    run_scenario(
        &coordinator,
        LaunchPolicy::TwoStep,
        demo_waypoints(),
        TermsDialogOptions::default(),
        SessionOptions::default(),
    )
    .await
    .unwrap();

    assert!(engine.are_terms_accepted());
    assert!(coordinator.is_guidance_running().await.unwrap());
}

#[tokio::test]
async fn test_scenario_aborts_when_terms_declined() {
    let (_engine, coordinator) = setup(false, false);

    let result = run_scenario(
        &coordinator,
        LaunchPolicy::TwoStep,
        demo_waypoints(),
        TermsDialogOptions::default(),
        SessionOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(Error::TermsNotAccepted)));
    assert!(coordinator.session_id().await.is_none());
}

#[tokio::test]
async fn test_scenario_stops_before_guidance_on_route_failure() {
    let (engine, coordinator) = setup(true, true);
    engine.push_route_status(RouteStatus::NetworkError);

    run_scenario(
        &coordinator,
        LaunchPolicy::TwoStep,
        demo_waypoints(),
        TermsDialogOptions::default(),
        SessionOptions::default(),
    )
    .await
    .unwrap();

    // The session exists but guidance never started
    assert!(coordinator.session_id().await.is_some());
    assert!(!coordinator.is_guidance_running().await.unwrap());
}
