use std::collections::HashMap;

use async_trait::async_trait;

use super::{blackhole::BlackholeStore, mock::MockStore, pinata::PinataStore};
use crate::config::StoreType;
use crate::error::PipelineError;
use crate::traits::StorageBackend;
use crate::types::{EncryptedPayload, StorageHandle};

/// Enum representing all possible evidence store implementations.
pub enum StoreVariant {
    Pinata(PinataStore),
    Mock(MockStore),
    Blackhole(BlackholeStore),
}

impl StoreVariant {
    /// Create a store instance based on the configured type.
    pub fn new(store_type: StoreType) -> Self {
        match store_type {
            StoreType::Pinata => StoreVariant::Pinata(PinataStore::new(
                "https://api.pinata.cloud".to_string(),
                std::env::var("PINATA_JWT").unwrap_or_default(),
            )),
            StoreType::Mock => StoreVariant::Mock(MockStore::new()),
            StoreType::Blackhole => StoreVariant::Blackhole(BlackholeStore),
        }
    }
}

#[async_trait]
impl StorageBackend for StoreVariant {
    fn name(&self) -> &'static str {
        match self {
            StoreVariant::Pinata(inner) => inner.name(),
            StoreVariant::Mock(inner) => inner.name(),
            StoreVariant::Blackhole(inner) => inner.name(),
        }
    }

    async fn upload(
        &self,
        payload: &EncryptedPayload,
        metadata: &HashMap<String, String>,
    ) -> Result<StorageHandle, PipelineError> {
        match self {
            StoreVariant::Pinata(inner) => inner.upload(payload, metadata).await,
            StoreVariant::Mock(inner) => inner.upload(payload, metadata).await,
            StoreVariant::Blackhole(inner) => inner.upload(payload, metadata).await,
        }
    }

    async fn retrieve(&self, handle: &StorageHandle) -> Result<EncryptedPayload, PipelineError> {
        match self {
            StoreVariant::Pinata(inner) => inner.retrieve(handle).await,
            StoreVariant::Mock(inner) => inner.retrieve(handle).await,
            StoreVariant::Blackhole(inner) => inner.retrieve(handle).await,
        }
    }
}
