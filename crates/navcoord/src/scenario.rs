//! Launch policies driving the coordinator through its lifecycle.
//!
//! The coordinator itself does not prescribe a call sequence; which one a
//! caller uses is a policy choice at the call site. The two policies here
//! reproduce the two sequences observed in interactive use.

use std::time::Duration;

use tracing::{info, warn};

use navcoord_core::{Error, Result, SessionOptions, TermsDialogOptions, Waypoint};
use navcoord_session::SessionCoordinator;

/// How the harness sequences session creation and guidance start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPolicy {
    /// Bring the session up on one user action, route and start guidance
    /// on a second
    TwoStep,

    /// After a fixed delay, chain create, set-destinations and
    /// start-guidance automatically
    AutoChain {
        /// Delay before the chained sequence begins
        delay: Duration,
    },
}

/// Drive the coordinator from cold to running guidance under the given
/// policy.
///
/// Ensures terms are accepted first (showing the consent dialog when
/// needed), then sequences the lifecycle. A route outcome other than ok
/// stops the scenario before guidance; coordinator errors propagate to
/// the caller.
pub async fn run_scenario(
    coordinator: &SessionCoordinator,
    policy: LaunchPolicy,
    waypoints: Vec<Waypoint>,
    terms: TermsDialogOptions,
    options: SessionOptions,
) -> Result<()> {
    if !coordinator.are_terms_accepted() {
        info!("Terms not yet accepted, showing dialog");
        let accepted = coordinator.show_terms_dialog(terms).await?;
        if !accepted {
            warn!("User declined terms, aborting scenario");
            return Err(Error::TermsNotAccepted);
        }
    }

    match policy {
        LaunchPolicy::TwoStep => {
            // First user action
            let id = coordinator.create_session(options).await?;
            info!("Session up: id={id}, state={:?}", coordinator.state().await);

            // Second user action
            route_and_start(coordinator, waypoints).await?;
        }
        LaunchPolicy::AutoChain { delay } => {
            info!("Auto-chaining lifecycle after {delay:?}");
            tokio::time::sleep(delay).await;

            coordinator.create_session(options).await?;
            route_and_start(coordinator, waypoints).await?;
        }
    }

    info!("Scenario finished: state={:?}", coordinator.state().await);
    Ok(())
}

async fn route_and_start(
    coordinator: &SessionCoordinator,
    waypoints: Vec<Waypoint>,
) -> Result<()> {
    let status = coordinator.set_destinations(waypoints).await?;
    if !status.is_ok() {
        warn!("Route calculation failed: {status:?}, guidance not started");
        return Ok(());
    }

    coordinator.start_guidance().await?;
    info!(
        "Guidance running: {}",
        coordinator.is_guidance_running().await?
    );
    Ok(())
}
