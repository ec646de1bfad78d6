//! Evidence vault: seal (encrypt) the evidence bundle and move it in and
//! out of content-addressed storage.

pub mod blackhole;
pub mod mock;
pub mod pinata;
pub mod variant;

pub use blackhole::BlackholeStore;
pub use mock::MockStore;
pub use pinata::PinataStore;
pub use variant::StoreVariant;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::crypto::{cipher, SessionKey};
use crate::error::PipelineError;
use crate::types::{EncryptedPayload, EvidenceBundle, StorageHandle};

const CONTENT_DOMAIN: &[u8] = b"revproof.evidence.v1";

/// Metadata keys that would defeat the point of sealing if a caller set
/// them. Rejected before any payload leaves the client.
const RESERVED_METADATA_KEYS: [&str; 4] = ["key", "secret", "encryption_key", "plaintext"];

/// Encrypt the evidence bundle under the session key.
///
/// Deterministic only in structure, never in ciphertext: a fresh nonce is
/// drawn on every call.
pub fn seal(bundle: &EvidenceBundle, key: &SessionKey) -> Result<EncryptedPayload, PipelineError> {
    cipher::encrypt(bundle, key)
}

/// Inverse of [`seal`], for auditors and borrowers who hold the key.
pub fn open(payload: &EncryptedPayload, key: &SessionKey) -> Result<EvidenceBundle, PipelineError> {
    cipher::decrypt(&payload.ciphertext, &payload.iv, key)
}

/// Content address of a payload: hex SHA-256 over the decoded nonce and
/// ciphertext bytes. Identical payloads always map to the same handle.
pub fn content_address(payload: &EncryptedPayload) -> Result<StorageHandle, PipelineError> {
    let iv = BASE64
        .decode(&payload.iv)
        .map_err(|e| PipelineError::Encoding(format!("invalid iv encoding: {e}")))?;
    let ct = BASE64
        .decode(&payload.ciphertext)
        .map_err(|e| PipelineError::Encoding(format!("invalid ciphertext encoding: {e}")))?;

    let mut hasher = Sha256::new();
    hasher.update(CONTENT_DOMAIN);
    hasher.update(&iv);
    hasher.update(&ct);
    Ok(StorageHandle(hex::encode(hasher.finalize())))
}

/// Reject metadata that tries to smuggle key material or plaintext fields
/// alongside the sealed payload.
pub fn check_metadata(
    metadata: &std::collections::HashMap<String, String>,
) -> Result<(), PipelineError> {
    for k in metadata.keys() {
        if RESERVED_METADATA_KEYS.contains(&k.to_ascii_lowercase().as_str()) {
            return Err(PipelineError::InvalidInput(format!(
                "metadata key '{k}' is reserved: uploads carry non-sensitive hints only"
            )));
        }
    }
    Ok(())
}
