use thiserror::Error;

/// Domain errors surfaced by the operation layer.
///
/// The HTTP adapter maps each variant to a status code; everything that is
/// not a well-known recoverable condition funnels into `Internal`.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input (e.g. invalid contract address format). Maps to 400.
    #[error("{message}")]
    Validation { message: String },

    /// The contract address was already submitted. Carries the existing
    /// record's id so the caller can treat the action as an implicit vote.
    /// Maps to 409.
    #[error("contract address already submitted")]
    DuplicateAddress { submission_id: String },

    /// This voter already voted for this submission. Only raised when a
    /// voter identity is supplied. Maps to 409.
    #[error("already voted for this submission")]
    DuplicateVote,

    /// Vote cooldown has not elapsed for this (submission, voter) pair.
    /// Maps to 429.
    #[error("rate limited: vote again later")]
    RateLimited { retry_after_seconds: u64 },

    /// Referenced record does not exist. Maps to 404.
    #[error("{message}")]
    NotFound { message: String },

    /// Persistence or other unexpected failure. Maps to 500.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
