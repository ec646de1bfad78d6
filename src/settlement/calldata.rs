//! Argument formatting for the on-chain `requestLoan` call.
//!
//! The verifier contract takes G2 coordinates with the extension-field
//! components swapped relative to the prover library's native order
//! (`[x1, x0]`, `[y1, y0]`). Getting this wrong does not error anywhere -
//! it silently produces proofs that fail to verify - so the encoding is
//! pinned by a byte-exact regression test.

use crate::error::PipelineError;
use crate::types::{
    ContractCallArgs, Fe, Proof, PublicSignals, StorageHandle, PROOF_CURVE, PROOF_PROTOCOL,
};

/// Field-element encoding of the qualification bit.
pub fn fe_from_bool(b: bool) -> Fe {
    let mut fe = [0u8; 32];
    fe[31] = b as u8;
    fe
}

/// Scale an amount in cents to the settlement token's minor units, exactly.
///
/// $10,000.00 at 6 decimals is 10_000_000_000 units.
pub fn scale_to_token_units(amount_cents: u64, token_decimals: u32) -> u128 {
    if token_decimals >= 2 {
        amount_cents as u128 * 10u128.pow(token_decimals - 2)
    } else {
        amount_cents as u128 / 10u128.pow(2 - token_decimals)
    }
}

/// Transform a proof into the exact coordinate order and field-element
/// encoding the settlement verifier expects.
pub fn build_call_args(
    proof: &Proof,
    signals: &PublicSignals,
    requested_amount_cents: u64,
    handle: &StorageHandle,
    token_decimals: u32,
) -> Result<ContractCallArgs, PipelineError> {
    if proof.protocol != PROOF_PROTOCOL || proof.curve != PROOF_CURVE {
        return Err(PipelineError::InvalidInput(format!(
            "settlement verifier expects {PROOF_PROTOCOL}/{PROOF_CURVE}, proof is {}/{}",
            proof.protocol, proof.curve
        )));
    }

    Ok(ContractCallArgs {
        a: [proof.a.x, proof.a.y],
        // Coordinate swap required by the verifier's pairing convention.
        b: [
            [proof.b.x[1], proof.b.x[0]],
            [proof.b.y[1], proof.b.y[0]],
        ],
        c: [proof.c.x, proof.c.y],
        input: [fe_from_bool(signals.is_qualified), signals.commitment],
        amount_units: scale_to_token_units(requested_amount_cents, token_decimals),
        evidence_handle: handle.0.clone(),
    })
}

impl ContractCallArgs {
    /// Flat calldata encoding: eleven 32-byte words in verifier argument
    /// order (`a`, swapped `b`, `c`, `input`, `amount`), then the evidence
    /// handle as UTF-8 bytes.
    pub fn encode_calldata(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(11 * 32 + self.evidence_handle.len());
        for word in [&self.a[0], &self.a[1]] {
            out.extend_from_slice(word);
        }
        for pair in &self.b {
            out.extend_from_slice(&pair[0]);
            out.extend_from_slice(&pair[1]);
        }
        for word in [&self.c[0], &self.c[1], &self.input[0], &self.input[1]] {
            out.extend_from_slice(word);
        }
        let mut amount_word = [0u8; 32];
        amount_word[16..].copy_from_slice(&self.amount_units.to_be_bytes());
        out.extend_from_slice(&amount_word);
        out.extend_from_slice(self.evidence_handle.as_bytes());
        out
    }
}
