use serde::{Deserialize, Serialize};

/// Fixed-size types used across the system.
pub type Hash256 = [u8; 32];

/// A 256-bit field element, big-endian, as the settlement verifier encodes
/// its calldata words.
pub type Fe = [u8; 32];

/// Calendar month a revenue sample belongs to.
///
/// Ordering is chronological (year first, then month), which is what the
/// aggregator relies on when it buckets the feed into a `BTreeMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthTag {
    pub year: u16,
    /// 1-based calendar month.
    pub month: u8,
}

impl std::fmt::Display for MonthTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One entry of the canonical monthly revenue series.
///
/// Amounts are kept in minor units (cents) end to end; no floating point
/// touches money anywhere in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSample {
    pub period: MonthTag,
    pub amount_cents: u64,
}

/// Raw line item from the revenue feed, before aggregation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// UTC unix timestamp in seconds.
    pub created: i64,
    /// Net amount in minor units. Negative for refunds/chargebacks.
    pub net_minor: i64,
}

/// The only values a third party ever sees in cleartext alongside the proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSignals {
    /// Single bit gating loan eligibility.
    pub is_qualified: bool,
    /// Binds the proof to the off-chain evidence without revealing it:
    /// a hash of the full sample series plus a random nonce.
    pub commitment: Hash256,
}

/// G1 pairing point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct G1Point {
    pub x: Fe,
    pub y: Fe,
}

/// G2 pairing point. Each coordinate is a quadratic extension element
/// `[c0, c1]` in the prover library's native order; the settlement verifier
/// expects the components swapped (see `settlement::build_call_args`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2Point {
    pub x: [Fe; 2],
    pub y: [Fe; 2],
}

/// Opaque pairing-based proof, produced once per verification session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub a: G1Point,
    pub b: G2Point,
    pub c: G1Point,
    pub protocol: String,
    pub curve: String,
}

pub const PROOF_PROTOCOL: &str = "groth16";
pub const PROOF_CURVE: &str = "bn128";

/// Digest of the fixed circuit's verification key. The prover and the
/// settlement verifier must agree on this value for contract parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey(pub Hash256);

/// The plaintext evidence sealed by the vault. Never leaves the client
/// unencrypted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub revenue_data: Vec<RevenueSample>,
    pub proof: Proof,
    /// UTC unix timestamp of when the bundle was sealed.
    pub timestamp: i64,
}

/// Ciphertext plus nonce, both base64. The only thing ever transmitted to
/// storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    pub ciphertext: String,
    pub iv: String,
}

/// Content address returned by the vault after upload. Immutable once
/// issued; identical payloads deduplicate to the same handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageHandle(pub String);

impl std::fmt::Display for StorageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle for confirmation tracking of a settlement-layer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle(pub String);

impl std::fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arguments in the exact shape the on-chain `requestLoan` call expects.
///
/// `b` is already in verifier order, i.e. the extension components of each
/// G2 coordinate are swapped relative to `Proof::b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCallArgs {
    pub a: [Fe; 2],
    pub b: [[Fe; 2]; 2],
    pub c: [Fe; 2],
    /// `[is_qualified, commitment]` as field elements.
    pub input: [Fe; 2],
    /// Requested amount scaled to the settlement token's minor units.
    pub amount_units: u128,
    pub evidence_handle: String,
}
