use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::types::{EncryptedPayload, StorageHandle};

/// Trait for content-addressed evidence stores (IPFS pinning services,
/// in-memory mocks).
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Persist the encrypted payload and return its content address once
    /// the store acknowledges durable receipt.
    ///
    /// Resending the same payload is safe and idempotent: content
    /// addressing deduplicates to the same handle. Metadata carries only
    /// non-sensitive hints - never the key, never plaintext evidence.
    async fn upload(
        &self,
        payload: &EncryptedPayload,
        metadata: &HashMap<String, String>,
    ) -> Result<StorageHandle, PipelineError>;

    /// Inverse lookup. Used by auditors and borrowers who hold the key,
    /// not by the pipeline's happy path.
    async fn retrieve(&self, handle: &StorageHandle) -> Result<EncryptedPayload, PipelineError>;
}
