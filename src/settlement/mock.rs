use std::sync::Mutex;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::PipelineError;
use crate::prover::derive_mock_proof;
use crate::traits::SettlementBackend;
use crate::types::{ContractCallArgs, PublicSignals, TransactionHandle, VerifyingKey};

/// Failure to inject into the next submission attempt.
pub enum InjectedOutcome {
    /// The user declines the wallet signature.
    UserReject,
    /// The contract reverts with this reason.
    Revert(String),
}

/// Mock settlement layer for testing.
///
/// Runs the same verification predicate as the mock prover - including the
/// G2 coordinate un-swap - so any argument-encoding mistake shows up as a
/// rejected submission, exactly as it would on-chain.
pub struct MockSettlement {
    vkey: VerifyingKey,
    /// Remaining pool liquidity, in token minor units.
    pub liquidity_units: Mutex<u128>,
    pub submitted: Mutex<Vec<ContractCallArgs>>,
    inject: Mutex<Option<InjectedOutcome>>,
}

impl MockSettlement {
    pub fn new(vkey: VerifyingKey) -> Self {
        Self {
            vkey,
            liquidity_units: Mutex::new(u128::MAX),
            submitted: Mutex::new(Vec::new()),
            inject: Mutex::new(None),
        }
    }

    pub fn with_liquidity(self, units: u128) -> Self {
        *self.liquidity_units.lock().unwrap() = units;
        self
    }

    /// Arrange for the next submission to fail.
    pub fn inject(&self, outcome: InjectedOutcome) {
        *self.inject.lock().unwrap() = Some(outcome);
    }

    /// The verifier predicate, with the same contract as
    /// `ProverBackend::verify`. Public, so tests can assert the two agree.
    pub fn verify_args(&self, args: &ContractCallArgs) -> bool {
        let Some(signals) = decode_signals(&args.input) else {
            return false;
        };
        let expected = derive_mock_proof(&self.vkey, &signals);
        args.a == [expected.a.x, expected.a.y]
            && args.b
                == [
                    [expected.b.x[1], expected.b.x[0]],
                    [expected.b.y[1], expected.b.y[0]],
                ]
            && args.c == [expected.c.x, expected.c.y]
    }
}

/// Recover the public signals from their field-element encoding. Rejects
/// anything that is not a canonical 0/1 qualification word.
fn decode_signals(input: &[crate::types::Fe; 2]) -> Option<PublicSignals> {
    let (bit, rest) = input[0].split_last()?;
    if rest.iter().any(|b| *b != 0) || *bit > 1 {
        return None;
    }
    Some(PublicSignals {
        is_qualified: *bit == 1,
        commitment: input[1],
    })
}

#[async_trait]
impl SettlementBackend for MockSettlement {
    fn name(&self) -> &'static str {
        "mock-settlement"
    }

    async fn submit(&self, args: &ContractCallArgs) -> Result<TransactionHandle, PipelineError> {
        if let Some(outcome) = self.inject.lock().unwrap().take() {
            return Err(match outcome {
                InjectedOutcome::UserReject => PipelineError::UserCancelled,
                InjectedOutcome::Revert(reason) => PipelineError::SubmissionRejected(reason),
            });
        }

        if !self.verify_args(args) {
            return Err(PipelineError::SubmissionRejected(
                "verifier: proof does not match public inputs".into(),
            ));
        }
        if args.input[0][31] != 1 {
            return Err(PipelineError::SubmissionRejected(
                "borrower does not meet qualification threshold".into(),
            ));
        }

        {
            let mut liquidity = self.liquidity_units.lock().unwrap();
            if args.amount_units > *liquidity {
                return Err(PipelineError::SubmissionRejected(
                    "insufficient pool liquidity".into(),
                ));
            }
            *liquidity -= args.amount_units;
        }

        self.submitted.lock().unwrap().push(args.clone());

        let digest = Sha256::digest(args.encode_calldata());
        let tx = TransactionHandle(format!("0x{}", hex::encode(digest)));
        info!(tx = %tx, amount_units = args.amount_units, "loan request accepted");
        Ok(tx)
    }
}
