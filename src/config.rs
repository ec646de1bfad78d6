use clap::{Args, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Lending qualification policy. External configuration, never hard-coded
/// into the aggregator.
#[derive(Debug, Clone, Copy, Args, Serialize, Deserialize)]
pub struct QualificationPolicy {
    /// Minimum annualized-revenue-to-loan ratio, in basis points
    /// (15_000 = 1.5x).
    #[arg(long, default_value_t = 15_000)]
    pub min_ratio_bps: u64,

    /// Trailing window of monthly samples the predicate evaluates.
    #[arg(long, default_value_t = 12)]
    pub lookback_months: u32,
}

impl Default for QualificationPolicy {
    fn default() -> Self {
        QualificationPolicy {
            min_ratio_bps: 15_000,
            lookback_months: 12,
        }
    }
}

/// Base configuration for the pipeline.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "revproof", about = "Privacy-preserving revenue verification pipeline")]
pub struct BaseConfig {
    #[command(flatten)]
    pub policy: QualificationPolicy,

    /// Decimal precision of the settlement token's minor unit.
    #[arg(long, default_value_t = 6)]
    pub token_decimals: u32,

    /// Maximum number of monthly samples the fixed circuit accepts.
    #[arg(long, default_value_t = 12)]
    pub max_circuit_samples: usize,

    /// Revenue feed backend to use.
    #[arg(long, value_enum, default_value_t = FeedType::Mock)]
    pub feed: FeedType,

    /// Prover backend to use.
    #[arg(long, value_enum, default_value_t = ProverType::Mock)]
    pub prover: ProverType,

    /// Evidence store backend to use.
    #[arg(long, value_enum, default_value_t = StoreType::Mock)]
    pub store: StoreType,

    /// Settlement backend to use.
    #[arg(long, value_enum, default_value_t = SettlementType::Mock)]
    pub settlement: SettlementType,
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            policy: QualificationPolicy::default(),
            token_decimals: 6,
            max_circuit_samples: 12,
            feed: FeedType::Mock,
            prover: ProverType::Mock,
            store: StoreType::Mock,
            settlement: SettlementType::Mock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum FeedType {
    Stripe,
    Mock,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ProverType {
    Mock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum StoreType {
    Pinata,
    Mock,
    Blackhole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum SettlementType {
    Contract,
    Mock,
}
