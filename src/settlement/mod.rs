pub mod calldata;
pub mod contract;
pub mod mock;
pub mod variant;

pub use calldata::{build_call_args, fe_from_bool, scale_to_token_units};
pub use contract::ContractSettlement;
pub use mock::{InjectedOutcome, MockSettlement};
pub use variant::SettlementVariant;
