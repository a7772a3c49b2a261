use std::io;

use thiserror::Error;

/// Unified error type for media collections.
///
/// Contract violations (bad index, foreign item, use after close) are errors.
/// A sub-collection refusing a removal is not: that comes back as `Ok(false)`.
#[derive(Debug, Error)]
pub enum Error {
    /// Index outside `[0, count)`.
    #[error("index {index} out of range, count is {count}")]
    OutOfRange { index: usize, count: usize },
    /// Item belongs to none of the tracked collections.
    #[error("item is not owned by any tracked collection")]
    UnknownItem,
    /// Operation on a collection that has been closed.
    #[error("collection is closed")]
    Closed,
    /// IO error from a filesystem-backed collection.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// ListParams could not be encoded or decoded.
    #[error("invalid list params: {0}")]
    Params(#[from] serde_json::Error),
    /// A uri that cannot back the requested collection.
    #[error("invalid uri: {0}")]
    InvalidUri(String),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
