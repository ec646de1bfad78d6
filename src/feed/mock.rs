use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::PipelineError;
use crate::traits::RevenueFeedBackend;
use crate::types::TransactionRecord;

/// Mock revenue feed for testing and demos.
pub struct MockFeed {
    pub records: Vec<TransactionRecord>,
    pub delay_ms: u64,
}

impl MockFeed {
    pub fn new(records: Vec<TransactionRecord>, delay_ms: u64) -> Self {
        Self { records, delay_ms }
    }

    /// Deterministic eight-month fixture (Jan-Aug 2025), one charge per
    /// month, amounts in dollars matching the dev dataset.
    pub fn fixture() -> Self {
        let monthly_dollars: [i64; 8] = [
            12_500, 15_200, 14_100, 18_500, 21_000, 19_800, 25_400, 24_100,
        ];
        let records = monthly_dollars
            .iter()
            .enumerate()
            .map(|(i, dollars)| TransactionRecord {
                created: mid_month_ts(2025, i as u32 + 1),
                net_minor: dollars * 100,
            })
            .collect();
        Self::new(records, 0)
    }
}

fn mid_month_ts(year: i32, month: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, 15)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

impl Default for MockFeed {
    fn default() -> Self {
        Self::fixture()
    }
}

#[async_trait]
impl RevenueFeedBackend for MockFeed {
    fn name(&self) -> &'static str {
        "mock-feed"
    }

    async fn fetch(&self, _credential: &str) -> Result<Vec<TransactionRecord>, PipelineError> {
        if self.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
        }
        Ok(self.records.clone())
    }
}
