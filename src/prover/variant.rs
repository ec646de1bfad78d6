use async_trait::async_trait;

use super::mock::MockProver;
use crate::config::ProverType;
use crate::error::PipelineError;
use crate::traits::ProverBackend;
use crate::types::{Proof, PublicSignals, RevenueSample, VerifyingKey};

/// Enum representing all possible prover implementations.
pub enum ProverVariant {
    Mock(MockProver),
}

impl ProverVariant {
    /// Create a prover instance based on the configured type.
    pub fn new(prover_type: ProverType, vkey: VerifyingKey, max_samples: usize) -> Self {
        match prover_type {
            ProverType::Mock => ProverVariant::Mock(MockProver::new(vkey, max_samples)),
        }
    }
}

#[async_trait]
impl ProverBackend for ProverVariant {
    fn name(&self) -> &'static str {
        match self {
            ProverVariant::Mock(inner) => inner.name(),
        }
    }

    async fn prove(
        &self,
        samples: &[RevenueSample],
        signals: &PublicSignals,
    ) -> Result<Proof, PipelineError> {
        match self {
            ProverVariant::Mock(inner) => inner.prove(samples, signals).await,
        }
    }

    fn verify(&self, proof: &Proof, signals: &PublicSignals, vkey: &VerifyingKey) -> bool {
        match self {
            ProverVariant::Mock(inner) => inner.verify(proof, signals, vkey),
        }
    }
}
