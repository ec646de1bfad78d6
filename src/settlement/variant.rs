use async_trait::async_trait;

use super::{contract::ContractSettlement, mock::MockSettlement};
use crate::config::SettlementType;
use crate::error::PipelineError;
use crate::traits::SettlementBackend;
use crate::types::{ContractCallArgs, TransactionHandle, VerifyingKey};

/// Enum representing all possible settlement implementations.
pub enum SettlementVariant {
    Contract(ContractSettlement),
    Mock(MockSettlement),
}

impl SettlementVariant {
    /// Create a settlement instance based on the configured type.
    pub fn new(settlement_type: SettlementType, vkey: VerifyingKey) -> Self {
        match settlement_type {
            SettlementType::Contract => SettlementVariant::Contract(ContractSettlement::new(
                std::env::var("LOAN_FACTORY_ADDRESS").unwrap_or_default(),
                5003,
            )),
            SettlementType::Mock => SettlementVariant::Mock(MockSettlement::new(vkey)),
        }
    }
}

#[async_trait]
impl SettlementBackend for SettlementVariant {
    fn name(&self) -> &'static str {
        match self {
            SettlementVariant::Contract(inner) => inner.name(),
            SettlementVariant::Mock(inner) => inner.name(),
        }
    }

    async fn submit(&self, args: &ContractCallArgs) -> Result<TransactionHandle, PipelineError> {
        match self {
            SettlementVariant::Contract(inner) => inner.submit(args).await,
            SettlementVariant::Mock(inner) => inner.submit(args).await,
        }
    }
}
