//! Error kinds raised by the game engine.

use thiserror::Error;

/// Validation and lookup failures of the game engine.
///
/// Construction-time failures reject object creation outright: no partially
/// valid [`Game`](crate::game::Game), [`Token`](crate::token::Token) or
/// [`TimeKeeper`](crate::time_keeper::TimeKeeper) is ever observable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A game should last for a non-zero amount of time.
    #[error("a game should last for a non-zero amount of time")]
    InvalidDuration,

    /// The size of an arithmetic progression should be at least 1.
    #[error("the size of an arithmetic progression should be at least 1, got {0}")]
    InvalidProgressionLength(usize),

    /// A clique should have a size of at least 2.
    #[error("a clique should have a size of at least 2, got {0}")]
    InvalidCliqueSize(usize),

    /// A token cannot hold a negative value.
    #[error("a token cannot hold a negative value, got {0}")]
    InvalidTokenValue(i64),

    /// The named player is not part of the roster.
    #[error("player '{0}' not found")]
    PlayerNotFound(String),

    /// The roster cannot change once the game has started.
    #[error("the roster is frozen once the game has started")]
    RosterFrozen,
}
