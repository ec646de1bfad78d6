//! Evidence aggregation: raw transaction feed -> canonical monthly series,
//! and derivation of the public predicate inputs.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike};
use tracing::{debug, warn};

use crate::config::QualificationPolicy;
use crate::crypto::commitment;
use crate::error::PipelineError;
use crate::types::{MonthTag, PublicSignals, RevenueSample, TransactionRecord};

/// Group raw line items by calendar month and sum positive nets per month.
///
/// Refunds and chargebacks (non-positive nets) never count toward revenue.
/// Output is one sample per month in chronological order; an empty feed
/// yields an empty series, not an error.
pub fn aggregate(feed: &[TransactionRecord]) -> Vec<RevenueSample> {
    let mut by_month: BTreeMap<MonthTag, u64> = BTreeMap::new();

    for record in feed {
        if record.net_minor <= 0 {
            continue;
        }
        let Some(period) = month_of(record.created) else {
            warn!(created = record.created, "dropping record with unrepresentable timestamp");
            continue;
        };
        *by_month.entry(period).or_insert(0) += record.net_minor as u64;
    }

    debug!(months = by_month.len(), records = feed.len(), "aggregated revenue feed");

    by_month
        .into_iter()
        .map(|(period, amount_cents)| RevenueSample { period, amount_cents })
        .collect()
}

fn month_of(unix_secs: i64) -> Option<MonthTag> {
    let dt = DateTime::from_timestamp(unix_secs, 0)?;
    let year = u16::try_from(dt.year()).ok()?;
    Some(MonthTag {
        year,
        month: dt.month() as u8,
    })
}

/// Compute the public predicate inputs for a sample series.
///
/// Qualification: the trailing `lookback_months` window is summed and
/// annualized (`sum * 12 / window_len`), then compared against the requested
/// amount scaled by `min_ratio_bps`. All arithmetic is integer, in cents.
///
/// The qualification bit is a pure function of (samples, amount, policy);
/// the commitment is not - it binds a fresh random nonce on every call.
pub fn derive_public_signals(
    samples: &[RevenueSample],
    requested_amount_cents: u64,
    policy: &QualificationPolicy,
) -> Result<PublicSignals, PipelineError> {
    if samples.is_empty() {
        return Err(PipelineError::EmptyEvidence(format!(
            "no revenue history; policy lookback is {} months",
            policy.lookback_months
        )));
    }

    let window_len = (policy.lookback_months as usize).min(samples.len()).max(1);
    let window = &samples[samples.len() - window_len..];
    let window_sum: u128 = window.iter().map(|s| s.amount_cents as u128).sum();
    let annualized = window_sum * 12 / window_len as u128;

    // annualized / requested >= min_ratio_bps / 10_000, cross-multiplied to
    // stay in integers.
    let is_qualified =
        annualized * 10_000 >= requested_amount_cents as u128 * policy.min_ratio_bps as u128;

    let nonce = commitment::random_nonce();
    let commitment = commitment::commit_samples(samples, &nonce);

    debug!(
        window_len,
        annualized_cents = annualized as u64,
        requested_amount_cents,
        is_qualified,
        "derived public signals"
    );

    Ok(PublicSignals {
        is_qualified,
        commitment,
    })
}
