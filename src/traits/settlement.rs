use async_trait::async_trait;

use crate::error::PipelineError;
use crate::types::{ContractCallArgs, TransactionHandle};

/// Trait for the settlement layer's loan-request entry point.
#[async_trait]
pub trait SettlementBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Dispatch the call and return a handle for confirmation tracking.
    ///
    /// Never retried automatically: settlement transactions are not
    /// idempotent. A wallet rejection surfaces as `UserCancelled`, an
    /// on-chain revert as `SubmissionRejected` with the reason verbatim.
    async fn submit(&self, args: &ContractCallArgs) -> Result<TransactionHandle, PipelineError>;
}
