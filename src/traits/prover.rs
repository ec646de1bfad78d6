use async_trait::async_trait;

use crate::error::PipelineError;
use crate::types::{Proof, PublicSignals, RevenueSample, VerifyingKey};

/// Trait for the external constraint-system prover, treated as a black box
/// honoring a fixed circuit interface.
#[async_trait]
pub trait ProverBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Generate a proof over the private samples and public inputs.
    ///
    /// May run for seconds; the session wraps it in a cancellable select.
    /// Malformed inputs (sample count or values outside the circuit's
    /// range) fail with `InvalidInput`; prover failures with
    /// `ProofGeneration`.
    async fn prove(
        &self,
        samples: &[RevenueSample],
        signals: &PublicSignals,
    ) -> Result<Proof, PipelineError>;

    /// Pure verification with the same contract as the on-chain verifier:
    /// same curve, same check, same argument ordering. Returns `false`,
    /// never errors, for a proof bound to different public signals.
    fn verify(&self, proof: &Proof, signals: &PublicSignals, vkey: &VerifyingKey) -> bool;
}
