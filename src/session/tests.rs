//! Unit tests for the state machine's transition rules and driver guards.

use std::sync::Arc;

use super::core::{SessionState, VerificationSession};
use crate::config::BaseConfig;
use crate::error::{ErrorCode, PipelineError};
use crate::feed::MockFeed;
use crate::prover::MockProver;
use crate::traits::MockObserver;
use crate::types::VerifyingKey;
use crate::vault::MockStore;

fn test_vkey() -> VerifyingKey {
    VerifyingKey([7u8; 32])
}

fn test_session() -> VerificationSession {
    VerificationSession::new(BaseConfig::default())
}

// ==================== TESTS: transition rules ====================

#[test]
fn test_forward_path_is_legal() {
    use SessionState::*;
    for (from, to) in [
        (Idle, Fetching),
        (Fetching, Generating),
        (Generating, Uploading),
        (Uploading, Submitting),
        (Submitting, Success),
    ] {
        assert!(SessionState::can_advance(from, to), "{from:?} -> {to:?}");
    }
}

#[test]
fn test_no_state_may_be_skipped() {
    use SessionState::*;
    for (from, to) in [
        (Idle, Generating),
        (Idle, Uploading),
        (Idle, Submitting),
        (Idle, Success),
        (Fetching, Uploading),
        (Fetching, Success),
        (Generating, Submitting),
        (Uploading, Success),
    ] {
        assert!(!SessionState::can_advance(from, to), "{from:?} -> {to:?}");
    }
}

#[test]
fn test_no_backward_transitions() {
    use SessionState::*;
    assert!(!SessionState::can_advance(Generating, Fetching));
    assert!(!SessionState::can_advance(Uploading, Generating));
    assert!(!SessionState::can_advance(Success, Fetching));
}

#[test]
fn test_error_reachable_from_non_terminal_only() {
    use SessionState::*;
    let err = Error(ErrorCode::ProofGeneration);
    for from in [Idle, Fetching, Generating, Uploading, Submitting] {
        assert!(SessionState::can_advance(from, err), "{from:?} -> Error");
    }
    assert!(!SessionState::can_advance(Success, err));
    assert!(!SessionState::can_advance(Error(ErrorCode::Decryption), err));
}

#[test]
fn test_idle_reachable_from_error_and_cancel() {
    use SessionState::*;
    assert!(SessionState::can_advance(Error(ErrorCode::NotFound), Idle));
    assert!(SessionState::can_advance(Success, Idle));
    assert!(SessionState::can_advance(Generating, Idle));
    assert!(SessionState::can_advance(Submitting, Idle));
}

// ==================== TESTS: session guards ====================

#[tokio::test]
async fn test_reset_requires_terminal_state() {
    let mut session = test_session();
    assert_eq!(session.state(), SessionState::Idle);
    // Reset from Idle is a no-op.
    session.reset().unwrap();
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_error_state_carries_taxonomy_code_and_cause() {
    let mut session = test_session();
    session.advance(SessionState::Fetching).unwrap();
    session.fail(&PipelineError::StorageUnavailable("pin timeout".into()));

    assert_eq!(
        session.state(),
        SessionState::Error(ErrorCode::StorageUnavailable)
    );
    assert!(session.last_error().unwrap().contains("pin timeout"));

    session.reset().unwrap();
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.last_error().is_some(), "cause survives for rendering");
}

#[tokio::test]
async fn test_run_rejected_when_not_idle() {
    let mut session = test_session();
    session.advance(SessionState::Fetching).unwrap();

    let feed = MockFeed::fixture();
    let prover = MockProver::new(test_vkey(), 12);
    let store = MockStore::new();
    let err = session
        .run_to_proof_ready(&feed, &prover, &store, "sk_test", 1_000_000)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::SessionBusy));
}

#[tokio::test]
async fn test_submission_rejected_without_proof_ready() {
    let mut session = test_session();
    let settlement = crate::settlement::MockSettlement::new(test_vkey());
    let err = session
        .complete_submission(&settlement, 1_000_000)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput(_)));
}

#[tokio::test]
async fn test_observer_sees_every_transition() {
    let mut session = test_session();
    let observer = Arc::new(MockObserver::new());
    session.add_observer(observer.clone());

    let feed = MockFeed::fixture();
    let prover = MockProver::new(test_vkey(), 12);
    let store = MockStore::new();
    session
        .run_to_proof_ready(&feed, &prover, &store, "sk_test", 1_000_000)
        .await
        .unwrap();

    let statuses = observer.statuses();
    let mut walk = statuses.iter();
    for expected in [
        SessionState::Fetching,
        SessionState::Generating,
        SessionState::Uploading,
        SessionState::Submitting,
    ] {
        assert!(
            walk.any(|s| *s == expected),
            "missing {expected:?} in {statuses:?}"
        );
    }
}
