//! Error types for the leaderboard and its backing store
//!
//! Every failure here is recoverable: the session turns it into an
//! advisory message and the persisted list is left as it was.

use thiserror::Error;

/// Failures talking to the key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage could not be read or written (quota, privacy mode, no window)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Stored blob is not a valid leaderboard
    #[error("stored data could not be parsed: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// Entries could not be encoded
    #[error("could not encode data: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Failures of leaderboard operations
#[derive(Error, Debug)]
pub enum LeaderboardError {
    /// Save attempted without a team name
    #[error("team name is missing")]
    MissingName,

    /// Save attempted with zero elapsed time
    #[error("elapsed time is empty")]
    EmptyTime,

    /// Persistence failed; the previous snapshot is still in place
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// Delete index past the end of the list
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for LeaderboardError
pub type Result<T, E = LeaderboardError> = std::result::Result<T, E>;
