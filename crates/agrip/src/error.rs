//! Common error types for agrip.

use thiserror::Error;

/// Errors a generation request can surface to the caller.
///
/// Every failure aborts the in-progress request; partially generated
/// tokens are discarded, never returned. There is no retry logic at this
/// layer — the front end decides whether to re-submit the whole request.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Malformed configuration or input sequences. A caller bug, not a
    /// transient condition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The scoring backend could not produce logits.
    #[error("scoring backend failed: {source}")]
    ScoringFailure {
        #[source]
        source: anyhow::Error,
    },

    /// Malformed logits reached the sampler.
    #[error("sampling failed: {0}")]
    SamplingFailure(String),
}

/// Result type for agrip generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
