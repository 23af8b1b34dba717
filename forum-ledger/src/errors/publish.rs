//! Error types for the notification publisher seam.
use thiserror::Error;

/// Represents errors that can occur while publishing a notification event.
///
/// Publish failure is deliberately non-fatal to the operation that triggered
/// it: callers log the error and record it in the operation's receipt instead
/// of propagating it.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
