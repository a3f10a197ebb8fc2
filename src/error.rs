use thiserror::Error;

use crate::services::validator::RejectionReason;

/// Everything that can go wrong while driving the backend. All variants are
/// surfaced to the user as a single human-readable notification; none are
/// retried.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The file was rejected before any network call.
    #[error("{0}")]
    Validation(#[from] RejectionReason),

    /// Transport failure or a non-2xx response without a usable body.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint responded, but the body carried an error message.
    #[error("{0}")]
    Application(String),

    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal state lock poisoned")]
    LockPoisoned,
}
