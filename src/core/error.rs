//! Engine error type.
//!
//! Every variant is a local, recoverable condition. An operation that
//! returns an error leaves the engine state exactly as it was.

/// Errors reported by board, rules, and engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Board dimension outside what the operation accepts.
    #[error("invalid board size {size}")]
    InvalidSize { size: usize },

    /// Cell index outside `[0, size²)`.
    #[error("cell index {index} out of range for a board of {cell_count} cells")]
    OutOfRange { index: usize, cell_count: usize },

    /// Attempted overwrite of a filled cell.
    #[error("cell {index} is already filled")]
    AlreadyFilled { index: usize },

    /// Size change requested after moves were made.
    #[error("cannot change size with {filled} move(s) on the board")]
    GameInProgress { filled: usize },

    /// Saved game bytes could not be decoded or encoded.
    #[error("saved game codec error: {0}")]
    Codec(String),

    /// The async session is no longer running.
    #[error("game session has shut down")]
    SessionClosed,
}

/// Convenience alias used throughout the crate.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Codec(err.to_string())
    }
}
