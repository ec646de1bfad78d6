pub mod feed;
pub mod observer;
pub mod prover;
pub mod settlement;
pub mod storage;

pub use feed::RevenueFeedBackend;
pub use observer::ChannelObserver;
pub use observer::MockObserver;
pub use observer::SessionEvent;
pub use observer::SessionObserver;
pub use prover::ProverBackend;
pub use settlement::SettlementBackend;
pub use storage::StorageBackend;
