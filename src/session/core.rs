//! Session aggregate and state transition rules - no stage logic.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::BaseConfig;
use crate::crypto::SessionKey;
use crate::error::{ErrorCode, PipelineError};
use crate::traits::{SessionEvent, SessionObserver};
use crate::types::{
    Proof, PublicSignals, RevenueSample, StorageHandle, TransactionHandle,
};

/// Observable workflow states.
///
/// Strictly forward: `Idle -> Fetching -> Generating -> Uploading ->
/// Submitting -> Success`, with `Error` reachable from any non-terminal
/// state and `Idle` reachable again via reset or explicit cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Fetching,
    Generating,
    Uploading,
    Submitting,
    Success,
    Error(ErrorCode),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Success | SessionState::Error(_))
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SessionState::Fetching
                | SessionState::Generating
                | SessionState::Uploading
                | SessionState::Submitting
        )
    }

    /// Whether `from -> to` is a legal transition. No state may be skipped.
    pub fn can_advance(from: SessionState, to: SessionState) -> bool {
        use SessionState::*;
        match (from, to) {
            (Idle, Fetching) => true,
            (Fetching, Generating) => true,
            (Generating, Uploading) => true,
            (Uploading, Submitting) => true,
            (Submitting, Success) => true,
            // Error from any non-terminal state.
            (from, Error(_)) => !from.is_terminal(),
            // Reset after a terminal state, or explicit cancel mid-flight.
            (Error(_), Idle) | (Success, Idle) => true,
            (from, Idle) => from.is_in_flight(),
            _ => false,
        }
    }
}

/// Clonable handle that cancels the session's in-flight stage from another
/// task.
#[derive(Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Everything the caller needs once the pipeline parks in `Submitting`:
/// the attestation to sign plus the exported evidence key to retain.
#[derive(Debug, Clone)]
pub struct ProofReady {
    pub proof: Proof,
    pub public_signals: PublicSignals,
    pub storage_handle: StorageHandle,
    /// Base64 export of the session key. The only copy outside process
    /// memory; the vault never holds it.
    pub exported_key: String,
}

/// Top-level aggregate for one verification attempt.
///
/// Owned exclusively by the initiating caller; `&mut self` on the driver
/// methods plus the `Idle` guard give at-most-one in-flight attempt.
/// Invariant: `proof` and `signals` are both present or both absent, and
/// `storage_handle` appears only after both.
pub struct VerificationSession {
    pub id: Uuid,
    pub(super) config: BaseConfig,
    pub(super) state: SessionState,
    pub(super) last_error: Option<String>,
    pub(super) key: Option<SessionKey>,
    pub(super) samples: Vec<RevenueSample>,
    pub(super) signals: Option<PublicSignals>,
    pub(super) proof: Option<Proof>,
    pub(super) storage_handle: Option<StorageHandle>,
    pub(super) transaction: Option<TransactionHandle>,
    pub(super) cancel_tx: watch::Sender<bool>,
    pub(super) cancel_rx: watch::Receiver<bool>,
    observers: Vec<Arc<dyn SessionObserver>>,
}

impl VerificationSession {
    pub fn new(config: BaseConfig) -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        Self {
            id: Uuid::new_v4(),
            config,
            state: SessionState::Idle,
            last_error: None,
            key: None,
            samples: Vec::new(),
            signals: None,
            proof: None,
            storage_handle: None,
            transaction: None,
            cancel_tx,
            cancel_rx,
            observers: Vec::new(),
        }
    }

    /// Register an observer for stage transitions. Purely informational.
    pub fn add_observer(&mut self, observer: Arc<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn public_signals(&self) -> Option<&PublicSignals> {
        self.signals.as_ref()
    }

    pub fn proof(&self) -> Option<&Proof> {
        self.proof.as_ref()
    }

    pub fn storage_handle(&self) -> Option<&StorageHandle> {
        self.storage_handle.as_ref()
    }

    pub fn transaction(&self) -> Option<&TransactionHandle> {
        self.transaction.as_ref()
    }

    /// Base64 export of the current session key, if one exists.
    pub fn exported_key(&self) -> Option<String> {
        self.key.as_ref().map(SessionKey::export)
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: self.cancel_tx.clone(),
        }
    }

    /// Return to `Idle` from a terminal state, discarding every artifact of
    /// the attempt. There is no partial resume: proof and evidence are
    /// cryptographically bound, so the next attempt starts from zero with a
    /// fresh key.
    pub fn reset(&mut self) -> Result<(), PipelineError> {
        if self.state.is_in_flight() {
            return Err(PipelineError::InvalidInput(
                "cannot reset an in-flight session; cancel it first".into(),
            ));
        }
        if self.state == SessionState::Idle {
            return Ok(());
        }
        self.discard_artifacts();
        self.advance(SessionState::Idle)
    }

    /// Transition into `next`, enforcing the forward-only rules, and notify
    /// observers.
    pub(super) fn advance(&mut self, next: SessionState) -> Result<(), PipelineError> {
        if !SessionState::can_advance(self.state, next) {
            return Err(PipelineError::InvalidInput(format!(
                "illegal transition {:?} -> {:?}",
                self.state, next
            )));
        }
        self.state = next;
        self.notify(None);
        Ok(())
    }

    /// Record a failure: preserve the taxonomy code, keep the cause for the
    /// caller, drop the attempt's artifacts.
    pub(super) fn fail(&mut self, err: &PipelineError) {
        if self.state.is_terminal() {
            warn!(session = %self.id, "failure after terminal state: {err}");
            return;
        }
        self.last_error = Some(err.to_string());
        self.discard_artifacts();
        self.state = SessionState::Error(err.code());
        self.notify(None);
    }

    /// Explicit cancel: straight back to `Idle` with nothing retained.
    pub(super) fn cancel_reset(&mut self) {
        info!(session = %self.id, state = ?self.state, "session cancelled");
        self.discard_artifacts();
        self.state = SessionState::Idle;
        self.notify(None);
    }

    fn discard_artifacts(&mut self) {
        // SessionKey zeroizes on drop; an abandoned key is never reused.
        self.key = None;
        self.samples.clear();
        self.signals = None;
        self.proof = None;
        self.storage_handle = None;
        self.transaction = None;
    }

    pub(super) fn notify(&self, progress: Option<u8>) {
        let event = SessionEvent {
            session_id: self.id,
            status: self.state,
            progress,
            storage_handle: self.storage_handle.clone(),
            transaction_hash: self.transaction.clone(),
            error: match self.state {
                SessionState::Error(code) => Some(code),
                _ => None,
            },
        };
        for observer in &self.observers {
            observer.on_transition(&event);
        }
    }
}
