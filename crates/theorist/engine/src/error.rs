//! Error types for hypothesis synthesis.

use thiserror::Error;

use trts_theorist_types::HypothesisId;

/// Errors that can occur while synthesising hypotheses.
#[derive(Debug, Error)]
pub enum TheoristError {
    /// No run in the batch carried value rows. Fatal for the batch.
    #[error("no analyzable runs")]
    NoAnalyzableRuns,

    /// A target constant name outside the known set.
    #[error("unknown target constant: {0}")]
    UnknownTarget(String),

    /// The contradiction tracker already holds an entry for this hypothesis.
    #[error("contradictions already recorded for {0}")]
    ContradictionAlreadyRecorded(HypothesisId),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for synthesis operations.
pub type TheoristResult<T> = Result<T, TheoristError>;
