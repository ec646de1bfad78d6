//! Async stage driver: fetch -> aggregate -> prove -> seal+upload, then a
//! caller-owned submission step (the settlement call needs a wallet
//! signature, so the state machine hands back a `ProofReady` instead of
//! owning it).

use std::collections::HashMap;
use std::future::Future;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, span, Level};

use super::core::{ProofReady, SessionState, VerificationSession};
use crate::aggregate;
use crate::crypto::SessionKey;
use crate::error::PipelineError;
use crate::settlement;
use crate::traits::{ProverBackend, RevenueFeedBackend, SettlementBackend, StorageBackend};
use crate::types::{EvidenceBundle, TransactionHandle};
use crate::vault;

/// Race a stage against the session's cancellation token.
async fn with_cancel<T>(
    mut cancel_rx: watch::Receiver<bool>,
    stage: impl Future<Output = Result<T, PipelineError>>,
) -> Result<T, PipelineError> {
    tokio::select! {
        res = stage => res,
        // A closed channel means the session is gone; treat it as cancel.
        _ = cancel_rx.wait_for(|cancelled| *cancelled) => Err(PipelineError::UserCancelled),
    }
}

impl VerificationSession {
    /// Drive the pipeline from `Idle` through `Fetching`, `Generating` and
    /// `Uploading`, parking in `Submitting` with the attestation bundle.
    ///
    /// Stages are strictly sequential; each is independently cancellable
    /// via [`VerificationSession::cancel_handle`]. Cancellation discards
    /// all intermediate data (key included) and returns to `Idle`; any
    /// other failure lands in `Error` with its taxonomy code. Calling this
    /// while the session is not `Idle` is rejected with `SessionBusy`.
    pub async fn run_to_proof_ready<F, P, S>(
        &mut self,
        feed: &F,
        prover: &P,
        store: &S,
        credential: &str,
        requested_amount_cents: u64,
    ) -> Result<ProofReady, PipelineError>
    where
        F: RevenueFeedBackend,
        P: ProverBackend,
        S: StorageBackend,
    {
        if self.state != SessionState::Idle {
            return Err(PipelineError::SessionBusy);
        }

        let span = span!(Level::INFO, "verification_session", id = %self.id);
        let _enter = span.enter();

        // Rearm the cancellation token (handles issued earlier stay valid,
        // a cancel aimed at a previous attempt does not carry over) and
        // mint a fresh key for this attempt.
        self.cancel_tx.send_replace(false);
        self.key = Some(SessionKey::generate());

        match self
            .drive(feed, prover, store, credential, requested_amount_cents)
            .await
        {
            Ok(ready) => Ok(ready),
            Err(PipelineError::UserCancelled) => {
                self.cancel_reset();
                Err(PipelineError::UserCancelled)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    async fn drive<F, P, S>(
        &mut self,
        feed: &F,
        prover: &P,
        store: &S,
        credential: &str,
        requested_amount_cents: u64,
    ) -> Result<ProofReady, PipelineError>
    where
        F: RevenueFeedBackend,
        P: ProverBackend,
        S: StorageBackend,
    {
        self.advance(SessionState::Fetching)?;
        info!(backend = feed.name(), "fetching revenue feed");
        let records = with_cancel(self.cancel_rx.clone(), feed.fetch(credential)).await?;

        self.samples = aggregate::aggregate(&records);
        let signals = aggregate::derive_public_signals(
            &self.samples,
            requested_amount_cents,
            &self.config.policy,
        )?;

        self.advance(SessionState::Generating)?;
        self.notify(Some(0));
        info!(
            backend = prover.name(),
            months = self.samples.len(),
            "generating solvency proof"
        );
        let proof =
            with_cancel(self.cancel_rx.clone(), prover.prove(&self.samples, &signals)).await?;
        self.signals = Some(signals);
        self.proof = Some(proof.clone());
        self.notify(Some(100));

        self.advance(SessionState::Uploading)?;
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| PipelineError::InvalidInput("session key missing".into()))?;
        let bundle = EvidenceBundle {
            revenue_data: self.samples.clone(),
            proof: proof.clone(),
            timestamp: Utc::now().timestamp(),
        };
        let payload = vault::seal(&bundle, key)?;

        let mut metadata = HashMap::new();
        metadata.insert("name".to_string(), format!("revproof_evidence_{}", self.id));
        metadata.insert(
            "key_hint".to_string(),
            "symmetric key retained client-side".to_string(),
        );
        vault::check_metadata(&metadata)?;

        info!(backend = store.name(), "uploading sealed evidence");
        let handle = with_cancel(self.cancel_rx.clone(), store.upload(&payload, &metadata)).await?;
        self.storage_handle = Some(handle.clone());

        // Proof ready: the settlement call is the caller's to sign.
        self.advance(SessionState::Submitting)?;

        let exported_key = self
            .key
            .as_ref()
            .map(SessionKey::export)
            .unwrap_or_default();
        Ok(ProofReady {
            proof,
            public_signals: signals,
            storage_handle: handle,
            exported_key,
        })
    }

    /// Caller-driven submission step, valid only while parked in
    /// `Submitting`. Success is terminal; a wallet rejection or an
    /// on-chain revert is terminal for the attempt and requires a full
    /// reset - settlement transactions are never retried automatically.
    pub async fn complete_submission<B>(
        &mut self,
        settlement: &B,
        requested_amount_cents: u64,
    ) -> Result<TransactionHandle, PipelineError>
    where
        B: SettlementBackend,
    {
        if self.state != SessionState::Submitting {
            return Err(PipelineError::InvalidInput(
                "no proof ready for submission".into(),
            ));
        }
        let (proof, signals, handle) = match (&self.proof, self.signals, &self.storage_handle) {
            (Some(p), Some(s), Some(h)) => (p, s, h),
            _ => {
                return Err(PipelineError::InvalidInput(
                    "session is missing proof artifacts".into(),
                ))
            }
        };

        let args = settlement::build_call_args(
            proof,
            &signals,
            requested_amount_cents,
            handle,
            self.config.token_decimals,
        )?;

        info!(backend = settlement.name(), "submitting attestation");
        match with_cancel(self.cancel_rx.clone(), settlement.submit(&args)).await {
            Ok(tx) => {
                self.transaction = Some(tx.clone());
                self.advance(SessionState::Success)?;
                info!(tx = %tx, "loan request confirmed");
                Ok(tx)
            }
            Err(PipelineError::UserCancelled) if *self.cancel_rx.borrow() => {
                // Caller-initiated cancel, as opposed to a wallet decline.
                self.cancel_reset();
                Err(PipelineError::UserCancelled)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }
}
