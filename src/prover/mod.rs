pub mod mock;
pub mod variant;

pub use mock::{derive_mock_proof, MockProver};
pub use variant::ProverVariant;
