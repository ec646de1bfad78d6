use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::traits::StorageBackend;
use crate::types::{EncryptedPayload, StorageHandle};

/// In-memory content-addressed store for testing.
pub struct MockStore {
    pub payloads: Arc<Mutex<HashMap<StorageHandle, EncryptedPayload>>>,
    fail_remaining: AtomicU32,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            payloads: Arc::new(Mutex::new(HashMap::new())),
            fail_remaining: AtomicU32::new(0),
        }
    }

    /// Fail the next `n` uploads with a retryable transport error.
    pub fn failing(self, n: u32) -> Self {
        self.fail_remaining.store(n, Ordering::SeqCst);
        self
    }

    pub fn stored_count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MockStore {
    fn name(&self) -> &'static str {
        "mock-store"
    }

    async fn upload(
        &self,
        payload: &EncryptedPayload,
        metadata: &HashMap<String, String>,
    ) -> Result<StorageHandle, PipelineError> {
        super::check_metadata(metadata)?;

        let remaining = self.fail_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(PipelineError::StorageUnavailable(
                "pinning service timed out (injected failure)".into(),
            ));
        }

        let handle = super::content_address(payload)?;
        self.payloads
            .lock()
            .unwrap()
            .insert(handle.clone(), payload.clone());
        Ok(handle)
    }

    async fn retrieve(&self, handle: &StorageHandle) -> Result<EncryptedPayload, PipelineError> {
        self.payloads
            .lock()
            .unwrap()
            .get(handle)
            .cloned()
            .ok_or_else(|| PipelineError::NotFound(handle.to_string()))
    }
}
