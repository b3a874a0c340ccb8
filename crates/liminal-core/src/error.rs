//! Error types for the Liminal Gateway core

use thiserror::Error;

/// Errors raised while building the responder's configuration-time data.
///
/// The request path itself has no distinguishable failure kinds: malformed
/// bodies are swallowed and anything unexpected surfaces as the framework's
/// generic 500.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid delay range: min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },

    #[error("unknown status table variant: {0}")]
    UnknownVariant(String),
}
