use surveyor_types::SessionId;
use thiserror::Error;

/// Failures surfaced by the session store.
///
/// Nothing here is fatal: callers are expected to handle `NotFound` and the
/// validation variants and carry on. Unreadable persisted documents never
/// reach this enum - read paths degrade to "absent" with a warning instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("assessment {0} not found")]
    NotFound(SessionId),

    #[error("no active assessment")]
    NoActiveSession,

    #[error("evidence index {index} out of bounds for list of {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("storage backend error: {0}")]
    Backend(#[from] std::io::Error),

    #[error("failed to encode persisted document: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
