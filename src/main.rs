use anyhow::Result;
use clap::Parser;
use tracing::info;

use revproof::config::BaseConfig;
use revproof::feed::FeedVariant;
use revproof::prover::ProverVariant;
use revproof::session::VerificationSession;
use revproof::settlement::SettlementVariant;
use revproof::types::VerifyingKey;
use revproof::vault::StoreVariant;

/// Demo runner: drives one verification session end to end against the
/// configured backends.
#[tokio::main]
async fn main() -> Result<()> {
    revproof::telemetry::init();
    info!("Starting revproof");

    let config = BaseConfig::parse();
    info!(
        "Configuration: min_ratio_bps={}, lookback_months={}, token_decimals={}",
        config.policy.min_ratio_bps, config.policy.lookback_months, config.token_decimals
    );

    // The circuit's verification key digest would normally ship with the
    // deployed verifier; the mock stack derives both sides from this seed.
    let vkey = VerifyingKey(*b"revproof.demo.verification.key.1");

    let feed = FeedVariant::new(config.feed);
    let prover = ProverVariant::new(config.prover, vkey, config.max_circuit_samples);
    let store = StoreVariant::new(config.store);
    let settlement = SettlementVariant::new(config.settlement, vkey);

    let requested_amount_cents = 1_000_000; // $10,000.00
    let mut session = VerificationSession::new(config);

    let ready = session
        .run_to_proof_ready(&feed, &prover, &store, "sk_test_demo", requested_amount_cents)
        .await?;
    info!(
        qualified = ready.public_signals.is_qualified,
        evidence_handle = %ready.storage_handle,
        "proof ready; retain the evidence key to decrypt later"
    );

    let tx = session
        .complete_submission(&settlement, requested_amount_cents)
        .await?;
    info!(tx = %tx, state = ?session.state(), "verification session complete");

    Ok(())
}
