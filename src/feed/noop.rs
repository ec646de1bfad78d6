use async_trait::async_trait;

use crate::error::PipelineError;
use crate::traits::RevenueFeedBackend;
use crate::types::TransactionRecord;

/// Feed that always returns an empty history, e.g. for a brand-new account.
pub struct NoopFeed;

#[async_trait]
impl RevenueFeedBackend for NoopFeed {
    fn name(&self) -> &'static str {
        "noop-feed"
    }

    async fn fetch(&self, _credential: &str) -> Result<Vec<TransactionRecord>, PipelineError> {
        Ok(Vec::new())
    }
}
