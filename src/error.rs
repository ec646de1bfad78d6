use thiserror::Error;

/// Error taxonomy for the verification pipeline.
///
/// Every failure the state machine surfaces carries one of these variants;
/// nothing is swallowed. Whether a variant is worth retrying is encoded in
/// [`PipelineError::is_retryable`] - the pipeline itself never retries
/// automatically.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed base64 or a serialization failure on the way into/out of
    /// the cipher.
    #[error("malformed encoding: {0}")]
    Encoding(String),

    /// AEAD authentication failed: tampered ciphertext or wrong key.
    /// No partial plaintext is ever released.
    #[error("decryption failed: authentication tag mismatch or wrong key")]
    Decryption,

    /// The evidence series does not meet the policy's minimum history.
    #[error("insufficient revenue evidence: {0}")]
    EmptyEvidence(String),

    /// Inputs outside the circuit's valid range, or otherwise malformed.
    /// Not retryable without correcting the input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Prover timeout or resource exhaustion. Retryable.
    #[error("proof generation failed: {0}")]
    ProofGeneration(String),

    /// Revenue feed transport failure. Retryable.
    #[error("revenue feed unavailable: {0}")]
    FeedUnavailable(String),

    /// Evidence store transport failure. Retryable; content addressing
    /// makes resending the same payload safe.
    #[error("evidence store unavailable: {0}")]
    StorageUnavailable(String),

    /// No payload exists for the requested handle.
    #[error("no payload found for handle {0}")]
    NotFound(String),

    /// The user declined the wallet signature. Terminal for the attempt.
    #[error("submission cancelled by user")]
    UserCancelled,

    /// The settlement layer reverted; carries the revert reason verbatim.
    #[error("settlement layer rejected submission: {0}")]
    SubmissionRejected(String),

    /// A verification session is already in flight for this aggregate.
    #[error("a verification session is already in flight")]
    SessionBusy,
}

/// Stable taxonomy codes, preserved across the state machine's `Error`
/// state so the caller can render or route on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    Encoding,
    Decryption,
    EmptyEvidence,
    InvalidInput,
    ProofGeneration,
    FeedUnavailable,
    StorageUnavailable,
    NotFound,
    UserCancelled,
    SubmissionRejected,
    SessionBusy,
}

impl PipelineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PipelineError::Encoding(_) => ErrorCode::Encoding,
            PipelineError::Decryption => ErrorCode::Decryption,
            PipelineError::EmptyEvidence(_) => ErrorCode::EmptyEvidence,
            PipelineError::InvalidInput(_) => ErrorCode::InvalidInput,
            PipelineError::ProofGeneration(_) => ErrorCode::ProofGeneration,
            PipelineError::FeedUnavailable(_) => ErrorCode::FeedUnavailable,
            PipelineError::StorageUnavailable(_) => ErrorCode::StorageUnavailable,
            PipelineError::NotFound(_) => ErrorCode::NotFound,
            PipelineError::UserCancelled => ErrorCode::UserCancelled,
            PipelineError::SubmissionRejected(_) => ErrorCode::SubmissionRejected,
            PipelineError::SessionBusy => ErrorCode::SessionBusy,
        }
    }

    /// Whether the caller may retry with the same (or regenerated) inputs.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PipelineError::ProofGeneration(_)
                | PipelineError::FeedUnavailable(_)
                | PipelineError::StorageUnavailable(_)
        )
    }
}
