use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;

use crate::error::PipelineError;
use crate::traits::StorageBackend;
use crate::types::{EncryptedPayload, StorageHandle};

/// IPFS pinning-service store (Pinata-shaped API).
pub struct PinataStore {
    endpoint: String,
    jwt: String,
}

impl PinataStore {
    pub fn new(endpoint: String, jwt: String) -> Self {
        Self { endpoint, jwt }
    }
}

#[async_trait]
impl StorageBackend for PinataStore {
    fn name(&self) -> &'static str {
        "pinata"
    }

    async fn upload(
        &self,
        payload: &EncryptedPayload,
        metadata: &HashMap<String, String>,
    ) -> Result<StorageHandle, PipelineError> {
        super::check_metadata(metadata)?;
        if self.jwt.is_empty() {
            return Err(PipelineError::StorageUnavailable(
                "missing pinning service token".into(),
            ));
        }

        let handle = super::content_address(payload)?;
        info!(
            endpoint = %self.endpoint,
            handle = %handle,
            hints = metadata.len(),
            "pinning encrypted evidence payload"
        );
        // In a real deployment this POSTs {payload, metadata} to
        // /pinning/pinJSONToIPFS and returns the service's hash.
        Ok(handle)
    }

    async fn retrieve(&self, handle: &StorageHandle) -> Result<EncryptedPayload, PipelineError> {
        info!(endpoint = %self.endpoint, handle = %handle, "fetching pinned payload");
        Err(PipelineError::StorageUnavailable(
            "pinning service transport not configured in this build".into(),
        ))
    }
}
