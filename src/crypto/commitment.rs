//! Commitment binding the private revenue series to a public value.
//!
//! SHA-256 over a domain-separated, length-prefixed encoding of the sample
//! sequence plus a random 32-byte nonce. The nonce makes the commitment
//! unlinkable across runs while the qualification bit stays deterministic.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::types::{Hash256, RevenueSample};

const COMMITMENT_DOMAIN: &[u8] = b"revproof.commitment.v1";

pub fn random_nonce() -> [u8; 32] {
    let mut nonce = [0u8; 32];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Commit to the full sample sequence under `nonce`.
pub fn commit_samples(samples: &[RevenueSample], nonce: &[u8; 32]) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(COMMITMENT_DOMAIN);
    hasher.update((samples.len() as u64).to_be_bytes());
    for sample in samples {
        hasher.update(sample.period.year.to_be_bytes());
        hasher.update([sample.period.month]);
        hasher.update(sample.amount_cents.to_be_bytes());
    }
    hasher.update(nonce);
    hasher.finalize().into()
}
