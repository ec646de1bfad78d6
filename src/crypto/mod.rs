pub mod cipher;
pub mod commitment;

pub use cipher::SessionKey;
pub use commitment::{commit_samples, random_nonce};
