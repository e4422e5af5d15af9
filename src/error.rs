use thiserror::Error;

/// Token decode errors.
///
/// The session guard never lets these escape to callers of the
/// validation paths; a token that fails to decode is treated as expired.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid token format: {0}")]
    InvalidFormat(#[from] jsonwebtoken::errors::Error),

    #[error("missing required claim: {0}")]
    MissingClaim(&'static str),

    #[error("invalid claim: {0}")]
    InvalidClaim(&'static str),
}

/// Persistence-layer errors from the durable credential storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced by the session bookkeeping entry points.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
