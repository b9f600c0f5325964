//! # Positional Games
//!
//! A modular Rust crate for simulating concurrent positional games: players
//! alternately claim tokens from a shared board until one achieves a
//! structural objective, the board empties, or the game clock expires.
//!
//! It provides:
//! - Two game kinds behind one engine: the arithmetic progression game
//!   (claim scalar tokens, build the longest progression) and the clique
//!   game (claim edges, build the largest clique)
//! - Turn coordination with one actor thread per player over a single shared
//!   aggregate (see the [`game`] module)
//! - Pluggable token-choice strategies via the
//!   [`TokenChooser`](crate::strategy::TokenChooser) trait
//! - A background [`TimeKeeper`](crate::time_keeper::TimeKeeper) bounding the
//!   game duration
//! - Board generators implementing the
//!   [`TokenFactory`](crate::generator::TokenFactory) contract
//!
//! # Documentation Overview
//!
//! - For the engine lifecycle, turn protocol and termination rules, see the
//!   [`game`] module.
//! - For scoring (longest arithmetic progression, largest clique), see the
//!   [`scoring`] module.
//! - For built-in and custom token-choice strategies, see the [`strategy`]
//!   module.
//! - For engine behavior knobs (narration, file logging, seeding), see
//!   [`GameConfig`](crate::config::GameConfig).
//!
//! # Usage Example
//!
//! ```
//! use std::time::Duration;
//! use positional_games::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Nine scalar tokens; first to hold four values in arithmetic
//!     // progression wins, within one minute.
//!     let board = Board::new((1..=9).map(Token::Value));
//!     let config = GameConfig::new().with_verbose(false);
//!     let game = Game::progression(board, Duration::from_secs(60), 4, config)?;
//!
//!     game.add_players([Player::random("ana"), Player::greedy("bogdan")]);
//!     game.start().join()?;
//!
//!     for (player, points) in game.ranking() {
//!         println!("{player}: {points} points");
//!     }
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

pub use anyhow;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod generator;
mod logger;
pub mod player;
pub mod scoring;
pub mod strategy;
pub mod time_keeper;
pub mod token;

/// Commonly used types and traits for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use positional_games::prelude::*;
/// ```
pub mod prelude {
    pub use crate::board::Board;
    pub use crate::config::GameConfig;
    pub use crate::error::GameError;
    pub use crate::game::{Game, GameHandle, GameKind, GameOutcome, GamePhase};
    pub use crate::generator::{CompleteGraph, TokenFactory, ValuePool};
    pub use crate::player::Player;
    pub use crate::strategy::*;
    pub use crate::time_keeper::TimeKeeper;
    pub use crate::token::Token;
}
