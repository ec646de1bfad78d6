use async_trait::async_trait;
use tracing::info;

use crate::error::PipelineError;
use crate::traits::RevenueFeedBackend;
use crate::types::TransactionRecord;

/// Stripe balance-transactions feed.
///
/// Reads charges with a restricted read-only key and reports net amounts in
/// cents. The actual HTTP integration lives outside this build; the backend
/// still owns credential validation so the pipeline fails fast on a key
/// that could never work.
pub struct StripeFeed {
    api_base: String,
    /// Page size for the balance-transactions listing.
    page_limit: u32,
}

impl StripeFeed {
    pub fn new(api_base: String) -> Self {
        Self {
            api_base,
            page_limit: 100,
        }
    }
}

#[async_trait]
impl RevenueFeedBackend for StripeFeed {
    fn name(&self) -> &'static str {
        "stripe"
    }

    async fn fetch(&self, credential: &str) -> Result<Vec<TransactionRecord>, PipelineError> {
        if !credential.starts_with("sk_") {
            return Err(PipelineError::InvalidInput(
                "stripe secret key must start with 'sk_'".into(),
            ));
        }

        info!(
            api_base = %self.api_base,
            limit = self.page_limit,
            "listing balance transactions (type=charge)"
        );
        // In a real deployment this pages backwards twelve months through
        // GET /v1/balance_transactions.
        Err(PipelineError::FeedUnavailable(
            "stripe transport not configured in this build".into(),
        ))
    }
}
