use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::PipelineError;
use crate::traits::ProverBackend;
use crate::types::{
    Fe, G1Point, G2Point, Proof, PublicSignals, RevenueSample, VerifyingKey, PROOF_CURVE,
    PROOF_PROTOCOL,
};

const MOCK_PROOF_DOMAIN: &[u8] = b"revproof.mock-groth16.v1";

/// Largest per-month amount the fixed circuit's range check accepts.
pub const MAX_SAMPLE_CENTS: u64 = 1 << 50;

/// Derive the proof points the mock circuit would emit for these public
/// signals under `vkey`.
///
/// Shared with the mock settlement verifier so both sides enforce exactly
/// the same pairing contract, coordinate ordering included.
pub fn derive_mock_proof(vkey: &VerifyingKey, signals: &PublicSignals) -> Proof {
    let point = |tag: &[u8]| -> Fe {
        let mut hasher = Sha256::new();
        hasher.update(MOCK_PROOF_DOMAIN);
        hasher.update(vkey.0);
        hasher.update([signals.is_qualified as u8]);
        hasher.update(signals.commitment);
        hasher.update(tag);
        hasher.finalize().into()
    };

    Proof {
        a: G1Point {
            x: point(b"a.x"),
            y: point(b"a.y"),
        },
        b: G2Point {
            x: [point(b"b.x0"), point(b"b.x1")],
            y: [point(b"b.y0"), point(b"b.y1")],
        },
        c: G1Point {
            x: point(b"c.x"),
            y: point(b"c.y"),
        },
        protocol: PROOF_PROTOCOL.to_string(),
        curve: PROOF_CURVE.to_string(),
    }
}

/// Mock prover standing in for the external constraint-system prover.
///
/// Proof points are derived deterministically from (vkey, public signals),
/// so `verify` has bit-for-bit parity with the mock on-chain verifier.
pub struct MockProver {
    vkey: VerifyingKey,
    max_samples: usize,
    pub delay_ms: u64,
    fail_remaining: AtomicU32,
}

impl MockProver {
    pub fn new(vkey: VerifyingKey, max_samples: usize) -> Self {
        Self {
            vkey,
            max_samples,
            delay_ms: 0,
            fail_remaining: AtomicU32::new(0),
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Fail the next `n` prove calls with a retryable error.
    pub fn failing(self, n: u32) -> Self {
        self.fail_remaining.store(n, Ordering::SeqCst);
        self
    }

    pub fn vkey(&self) -> VerifyingKey {
        self.vkey
    }

    fn validate(&self, samples: &[RevenueSample]) -> Result<(), PipelineError> {
        if samples.len() > self.max_samples {
            return Err(PipelineError::InvalidInput(format!(
                "circuit accepts at most {} samples, got {}",
                self.max_samples,
                samples.len()
            )));
        }
        if let Some(s) = samples.iter().find(|s| s.amount_cents > MAX_SAMPLE_CENTS) {
            return Err(PipelineError::InvalidInput(format!(
                "sample for {} exceeds circuit range",
                s.period
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ProverBackend for MockProver {
    fn name(&self) -> &'static str {
        "mock-prover"
    }

    async fn prove(
        &self,
        samples: &[RevenueSample],
        signals: &PublicSignals,
    ) -> Result<Proof, PipelineError> {
        self.validate(samples)?;

        if self.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
        }

        let remaining = self.fail_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(PipelineError::ProofGeneration(
                "prover worker exhausted (injected failure)".into(),
            ));
        }

        debug!(samples = samples.len(), "mock prover witnessing solvency predicate");
        Ok(derive_mock_proof(&self.vkey, signals))
    }

    fn verify(&self, proof: &Proof, signals: &PublicSignals, vkey: &VerifyingKey) -> bool {
        derive_mock_proof(vkey, signals) == *proof
    }
}
