use async_trait::async_trait;

use super::{mock::MockFeed, noop::NoopFeed, stripe::StripeFeed};
use crate::config::FeedType;
use crate::error::PipelineError;
use crate::traits::RevenueFeedBackend;
use crate::types::TransactionRecord;

/// Enum representing all possible revenue feed implementations.
pub enum FeedVariant {
    Stripe(StripeFeed),
    Mock(MockFeed),
    Noop(NoopFeed),
}

impl FeedVariant {
    /// Create a feed instance based on the configured type.
    pub fn new(feed_type: FeedType) -> Self {
        match feed_type {
            FeedType::Stripe => {
                FeedVariant::Stripe(StripeFeed::new("https://api.stripe.com".to_string()))
            }
            FeedType::Mock => FeedVariant::Mock(MockFeed::fixture()),
            FeedType::Noop => FeedVariant::Noop(NoopFeed),
        }
    }
}

#[async_trait]
impl RevenueFeedBackend for FeedVariant {
    fn name(&self) -> &'static str {
        match self {
            FeedVariant::Stripe(inner) => inner.name(),
            FeedVariant::Mock(inner) => inner.name(),
            FeedVariant::Noop(inner) => inner.name(),
        }
    }

    async fn fetch(&self, credential: &str) -> Result<Vec<TransactionRecord>, PipelineError> {
        match self {
            FeedVariant::Stripe(inner) => inner.fetch(credential).await,
            FeedVariant::Mock(inner) => inner.fetch(credential).await,
            FeedVariant::Noop(inner) => inner.fetch(credential).await,
        }
    }
}
