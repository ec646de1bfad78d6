use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::traits::StorageBackend;
use crate::types::{EncryptedPayload, StorageHandle};

/// Store that acknowledges uploads with the correct content address but
/// keeps nothing. Retrieval always misses.
pub struct BlackholeStore;

#[async_trait]
impl StorageBackend for BlackholeStore {
    fn name(&self) -> &'static str {
        "blackhole-store"
    }

    async fn upload(
        &self,
        payload: &EncryptedPayload,
        metadata: &HashMap<String, String>,
    ) -> Result<StorageHandle, PipelineError> {
        super::check_metadata(metadata)?;
        super::content_address(payload)
    }

    async fn retrieve(&self, handle: &StorageHandle) -> Result<EncryptedPayload, PipelineError> {
        Err(PipelineError::NotFound(handle.to_string()))
    }
}
