//! Authenticated symmetric encryption for evidence payloads.
//!
//! AES-256-GCM with a fresh 96-bit nonce per call. Keys are session-scoped:
//! generated client-side, exportable as base64 for the user to retain, and
//! zeroized on drop. The vault never sees a key.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use zeroize::Zeroize;

use crate::error::PipelineError;
use crate::types::EncryptedPayload;

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 12;

/// A fresh 256-bit symmetric key, scoped to one verification session.
///
/// Exists only client-side. `Debug` is redacted so the key can never leak
/// through logs, and the bytes are zeroized when the session drops it.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey {
    bytes: [u8; KEY_LEN],
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl SessionKey {
    /// Generate a fresh key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        SessionKey { bytes }
    }

    /// Serialize to base64 so the user can retain the key out of band.
    pub fn export(&self) -> String {
        BASE64.encode(self.bytes)
    }

    /// Inverse of [`SessionKey::export`]; the round trip is exact.
    pub fn import(encoded: &str) -> Result<Self, PipelineError> {
        let raw = BASE64
            .decode(encoded)
            .map_err(|e| PipelineError::Encoding(format!("invalid key encoding: {e}")))?;
        let bytes: [u8; KEY_LEN] = raw
            .try_into()
            .map_err(|_| PipelineError::Encoding("key must be 32 bytes".into()))?;
        Ok(SessionKey { bytes })
    }
}

/// Serialize `value` to canonical JSON bytes and encrypt under `key` with a
/// fresh nonce. Returns ciphertext and nonce, both base64.
pub fn encrypt<T: Serialize>(
    value: &T,
    key: &SessionKey,
) -> Result<EncryptedPayload, PipelineError> {
    let plaintext = serde_json::to_vec(value)
        .map_err(|e| PipelineError::Encoding(format!("plaintext serialization: {e}")))?;

    let mut iv = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut iv);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key.bytes));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_slice())
        .map_err(|_| PipelineError::Encoding("payload too large to encrypt".into()))?;

    Ok(EncryptedPayload {
        ciphertext: BASE64.encode(ciphertext),
        iv: BASE64.encode(iv),
    })
}

/// Inverse of [`encrypt`]. Fails with `Decryption` on tag mismatch, corrupt
/// ciphertext, or the wrong key - never returns partial plaintext.
pub fn decrypt<T: DeserializeOwned>(
    ciphertext: &str,
    iv: &str,
    key: &SessionKey,
) -> Result<T, PipelineError> {
    let ct = BASE64
        .decode(ciphertext)
        .map_err(|e| PipelineError::Encoding(format!("invalid ciphertext encoding: {e}")))?;
    let iv_raw = BASE64
        .decode(iv)
        .map_err(|e| PipelineError::Encoding(format!("invalid iv encoding: {e}")))?;
    if iv_raw.len() != NONCE_LEN {
        return Err(PipelineError::Encoding(format!(
            "iv must be {NONCE_LEN} bytes, got {}",
            iv_raw.len()
        )));
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key.bytes));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&iv_raw), ct.as_slice())
        .map_err(|_| PipelineError::Decryption)?;

    serde_json::from_slice(&plaintext)
        .map_err(|e| PipelineError::Encoding(format!("plaintext deserialization: {e}")))
}
