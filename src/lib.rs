// Library exports for testing and external use

pub mod aggregate;
pub mod config;
pub mod crypto;
pub mod error;
pub mod feed;
pub mod prover;
pub mod session;
pub mod settlement;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod vault;

// Re-export commonly used types and traits
pub use config::{
    BaseConfig, FeedType, ProverType, QualificationPolicy, SettlementType, StoreType,
};
pub use error::{ErrorCode, PipelineError};
pub use session::{CancelHandle, ProofReady, SessionState, VerificationSession};
pub use traits::{
    ProverBackend, RevenueFeedBackend, SessionEvent, SessionObserver, SettlementBackend,
    StorageBackend,
};
pub use types::{
    ContractCallArgs, EncryptedPayload, EvidenceBundle, MonthTag, Proof, PublicSignals,
    RevenueSample, StorageHandle, TransactionHandle, TransactionRecord, VerifyingKey,
};

// Re-export variant enums for convenience
pub use feed::{FeedVariant, MockFeed};
pub use prover::{MockProver, ProverVariant};
pub use settlement::{MockSettlement, SettlementVariant};
pub use vault::{MockStore, StoreVariant};
