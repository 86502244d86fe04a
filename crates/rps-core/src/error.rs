//! Errors surfaced by game calls.

use crate::ledger::LedgerError;
use thiserror::Error;

/// Rejection reasons for create, commit and reveal calls
///
/// A rejected call never changes state; callers resubmit with corrected
/// inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game has not been created")]
    GameNotFound,

    #[error("game already exists")]
    GameAlreadyExists,

    #[error("game already has players")]
    GameFull,

    #[error("result has been saved")]
    CommitAlreadySaved,

    #[error("waiting commits from players")]
    AwaitingCommits,

    #[error("incorrect result")]
    InvalidMoveRange(u8),

    #[error("error result")]
    RevealMismatch,

    #[error("result has been revealed")]
    AlreadyRevealed,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl GameError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            GameError::GameNotFound => "game_not_found",
            GameError::GameAlreadyExists => "game_already_exists",
            GameError::GameFull => "game_full",
            GameError::CommitAlreadySaved => "commit_already_saved",
            GameError::AwaitingCommits => "awaiting_commits",
            GameError::InvalidMoveRange(_) => "invalid_move_range",
            GameError::RevealMismatch => "reveal_mismatch",
            GameError::AlreadyRevealed => "already_revealed",
            GameError::Ledger(LedgerError::TimestampNotMonotonic { .. }) => {
                "timestamp_not_monotonic"
            }
            GameError::Ledger(LedgerError::Encoding(_)) => "log_encoding",
        }
    }
}
