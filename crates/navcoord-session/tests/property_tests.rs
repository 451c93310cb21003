//! Property-based tests for the coordinator state machine.
//!
//! Uses proptest to generate random operation sequences and verify them
//! against a simple reference model: error kinds must match the model
//! exactly and the engine must never hold more than one live session.

use std::sync::Arc;

use proptest::prelude::*;

use navcoord_core::{
    Error, LatLng, LocationPermission, RouteStatus, SessionOptions, TermsDialogOptions, Waypoint,
};
use navcoord_engine::{
    FixedLocationAuthorization, NavigationEngine, SimulatedEngine, SimulatedEngineConfig,
};
use navcoord_session::SessionCoordinator;

/// One coordinator operation, as generated by proptest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    AcceptTerms,
    ResetTerms,
    CreateSession,
    SetValidDestinations,
    SetEmptyDestinations,
    SetDuplicateDestinations,
    StartGuidance,
    StopGuidance,
    QueryGuidance,
    Cleanup,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AcceptTerms),
        Just(Op::ResetTerms),
        Just(Op::CreateSession),
        Just(Op::SetValidDestinations),
        Just(Op::SetEmptyDestinations),
        Just(Op::SetDuplicateDestinations),
        Just(Op::StartGuidance),
        Just(Op::StopGuidance),
        Just(Op::QueryGuidance),
        Just(Op::Cleanup),
    ]
}

/// Reference model of the coordinator's observable state.
struct Model {
    terms_accepted: bool,
    has_session: bool,
    guidance: bool,
    sessions_created: usize,
}

fn wp(lat: f64, lng: f64) -> Waypoint {
    Waypoint::new(LatLng::new(lat, lng), "prop")
}

async fn apply(
    op: Op,
    coordinator: &SessionCoordinator,
    model: &mut Model,
) -> Result<(), TestCaseError> {
    match op {
        Op::AcceptTerms => {
            let accepted = coordinator
                .show_terms_dialog(TermsDialogOptions::default())
                .await
                .unwrap();
            prop_assert!(accepted);
            model.terms_accepted = true;
        }
        Op::ResetTerms => {
            let result = coordinator.reset_terms_accepted().await;
            if model.has_session {
                prop_assert!(matches!(result, Err(Error::TermsResetNotAllowed)));
            } else {
                prop_assert!(result.is_ok());
                model.terms_accepted = false;
            }
        }
        Op::CreateSession => {
            let result = coordinator.create_session(SessionOptions::default()).await;
            if !model.terms_accepted {
                prop_assert!(matches!(result, Err(Error::TermsNotAccepted)));
            } else {
                prop_assert!(result.is_ok());
                if !model.has_session {
                    model.has_session = true;
                    model.sessions_created += 1;
                }
            }
        }
        Op::SetValidDestinations => {
            let result = coordinator.set_destinations(vec![wp(1.0, 2.0), wp(3.0, 4.0)]).await;
            if model.has_session {
                prop_assert_eq!(result.unwrap(), RouteStatus::Ok);
            } else {
                prop_assert!(matches!(result, Err(Error::SessionNotInitialized)));
            }
        }
        Op::SetEmptyDestinations => {
            let result = coordinator.set_destinations(vec![]).await;
            if model.has_session {
                prop_assert_eq!(result.unwrap(), RouteStatus::NoWaypoints);
            } else {
                prop_assert!(matches!(result, Err(Error::SessionNotInitialized)));
            }
        }
        Op::SetDuplicateDestinations => {
            let result = coordinator.set_destinations(vec![wp(1.0, 2.0), wp(1.0, 2.0)]).await;
            if model.has_session {
                prop_assert_eq!(result.unwrap(), RouteStatus::DuplicateWaypoints);
            } else {
                prop_assert!(matches!(result, Err(Error::SessionNotInitialized)));
            }
        }
        Op::StartGuidance => {
            let result = coordinator.start_guidance().await;
            if model.has_session {
                prop_assert!(result.is_ok());
                model.guidance = true;
            } else {
                prop_assert!(matches!(result, Err(Error::SessionNotInitialized)));
            }
        }
        Op::StopGuidance => {
            let result = coordinator.stop_guidance().await;
            if model.has_session {
                prop_assert!(result.is_ok());
                model.guidance = false;
            } else {
                prop_assert!(matches!(result, Err(Error::SessionNotInitialized)));
            }
        }
        Op::QueryGuidance => {
            let result = coordinator.is_guidance_running().await;
            if model.has_session {
                prop_assert_eq!(result.unwrap(), model.guidance);
            } else {
                prop_assert!(matches!(result, Err(Error::SessionNotInitialized)));
            }
        }
        Op::Cleanup => {
            let result = coordinator.cleanup().await;
            if model.has_session {
                prop_assert!(result.is_ok());
                model.has_session = false;
                model.guidance = false;
            } else {
                prop_assert!(matches!(result, Err(Error::SessionNotInitialized)));
            }
        }
    }
    Ok(())
}

proptest! {
    /// Any call sequence matches the reference model: precondition errors
    /// use the exact kind the contract names and never another.
    #[test]
    fn sequences_match_reference_model(
        ops in prop::collection::vec(op_strategy(), 0..40),
        terms_accepted in any::<bool>(),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let engine = Arc::new(SimulatedEngine::with_config(SimulatedEngineConfig {
                terms_accepted,
                ..Default::default()
            }));
            let location = Arc::new(FixedLocationAuthorization::new(
                LocationPermission::AuthorizedWhenInUse,
            ));
            let coordinator =
                SessionCoordinator::new(Arc::clone(&engine) as Arc<dyn NavigationEngine>, location);

            let mut model = Model {
                terms_accepted,
                has_session: false,
                guidance: false,
                sessions_created: 0,
            };

            for op in ops {
                apply(op, &coordinator, &mut model).await?;

                // Idempotent reuse: the engine never handed out more
                // sessions than the model's create-from-empty count
                prop_assert_eq!(engine.sessions_created(), model.sessions_created);

                // The authoritative state query agrees with the model
                prop_assert_eq!(coordinator.state().await.has_session(), model.has_session);
            }
            Ok(())
        })?;
    }

    /// Session-scoped calls with no session always fail with the same
    /// kind, regardless of what the rest of the sequence did.
    #[test]
    fn no_session_always_means_session_not_initialized(
        ops in prop::collection::vec(op_strategy(), 0..20),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let engine = Arc::new(SimulatedEngine::with_config(SimulatedEngineConfig {
                terms_accepted: true,
                ..Default::default()
            }));
            let location = Arc::new(FixedLocationAuthorization::new(
                LocationPermission::AuthorizedAlways,
            ));
            let coordinator =
                SessionCoordinator::new(Arc::clone(&engine) as Arc<dyn NavigationEngine>, location);

            for op in ops {
                // Drive the coordinator without tracking outcomes
                let _ = match op {
                    Op::CreateSession => coordinator
                        .create_session(SessionOptions::default())
                        .await
                        .map(|_| ()),
                    Op::Cleanup => coordinator.cleanup().await,
                    Op::StartGuidance => coordinator.start_guidance().await,
                    Op::StopGuidance => coordinator.stop_guidance().await,
                    _ => Ok(()),
                };
            }

            // Force the no-session state, then probe every scoped call
            let _ = coordinator.cleanup().await;
            prop_assert!(matches!(
                coordinator.start_guidance().await,
                Err(Error::SessionNotInitialized)
            ));
            prop_assert!(matches!(
                coordinator.stop_guidance().await,
                Err(Error::SessionNotInitialized)
            ));
            prop_assert!(matches!(
                coordinator.is_guidance_running().await,
                Err(Error::SessionNotInitialized)
            ));
            prop_assert!(matches!(
                coordinator.set_destinations(vec![wp(0.0, 0.0)]).await,
                Err(Error::SessionNotInitialized)
            ));
            prop_assert!(matches!(
                coordinator.cleanup().await,
                Err(Error::SessionNotInitialized)
            ));
            Ok(())
        })?;
    }
}
