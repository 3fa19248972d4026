//! Gateway Error Taxonomy

use thiserror::Error;

/// Failure classes for record operations. None of these are fatal; every
/// caller surfaces them as a message and keeps the last-known-good cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Requested id absent on the backend.
    #[error("Record not found")]
    NotFound,
    /// Rejected input, reported before or by the backend.
    #[error("{0}")]
    Validation(String),
    /// Request never produced a usable response, or the backend reported a
    /// top-level failure.
    #[error("{0}")]
    Transport(String),
    /// Some records of a batch write failed; carries every failure message.
    #[error("{}", .0.join("; "))]
    Partial(Vec<String>),
}
