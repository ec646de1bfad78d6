use async_trait::async_trait;

use crate::error::PipelineError;
use crate::types::TransactionRecord;

/// Trait for revenue feed sources (Stripe, mock fixtures, etc.).
///
/// A read-only call against a third-party financial data source; the
/// pipeline only consumes its output shape.
#[async_trait]
pub trait RevenueFeedBackend: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &'static str;

    /// Fetch the raw transaction feed for the given credential.
    ///
    /// The credential is opaque to the pipeline; backends own its
    /// validation (e.g. Stripe's `sk_` prefix).
    async fn fetch(&self, credential: &str) -> Result<Vec<TransactionRecord>, PipelineError>;
}
