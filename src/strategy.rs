//! Token-choice strategies used by player actors to pick their next claim.
//!
//! This module defines the [`TokenChooser`] trait and the built-in choosers
//! injected into [`Player`](crate::player::Player)s by the engine.
//!
//! # Provided choosers
//! - [`RandomChooser`]: uniform pick among the tokens currently on the board.
//! - [`GreedyChooser`]: takes the blank wildcard whenever the board still
//!   holds one, otherwise falls back to a uniform random pick.
//! - [`ManualChooser`]: delegates to an external [`TokenPrompt`]
//!   collaborator, typically backed by interactive input.
//!
//! # Implementing a custom chooser
//! Implement [`TokenChooser`] on your own type. The engine calls `choose`
//! with a snapshot of the unclaimed tokens, outside of the game lock, so a
//! chooser may block (e.g. on user input). A chooser that returns a token
//! absent from the snapshot is simply asked again; non-interactive choosers
//! should only ever pick from the snapshot.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::token::Token;

/// Strategy for extracting a token from the board.
pub trait TokenChooser {
    /// Picks one token given the tokens currently on the board.
    ///
    /// The engine never offers an empty snapshot.
    fn choose(&mut self, board: &[Token]) -> Token;
}

/// Chooses uniformly at random among the tokens on the board.
#[derive(Debug)]
pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    /// A chooser seeded from the operating system.
    pub fn new() -> RandomChooser {
        RandomChooser {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A chooser with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> RandomChooser {
        RandomChooser {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenChooser for RandomChooser {
    fn choose(&mut self, board: &[Token]) -> Token {
        *board
            .choose(&mut self.rng)
            .expect("cannot choose from an empty board")
    }
}

/// Prefers the blank wildcard while one is on the board, then picks randomly.
#[derive(Debug)]
pub struct GreedyChooser {
    rng: StdRng,
}

impl GreedyChooser {
    /// A chooser seeded from the operating system.
    pub fn new() -> GreedyChooser {
        GreedyChooser {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A chooser with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> GreedyChooser {
        GreedyChooser {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenChooser for GreedyChooser {
    fn choose(&mut self, board: &[Token]) -> Token {
        if let Some(wildcard) = board.iter().find(|token| token.is_wildcard()) {
            return *wildcard;
        }
        *board
            .choose(&mut self.rng)
            .expect("cannot choose from an empty board")
    }
}

/// External collaborator producing token choices for a [`ManualChooser`].
///
/// Interactive input collection lives outside this crate; tests inject
/// scripted prompts.
pub trait TokenPrompt {
    /// Requests one token choice, given the tokens currently on the board.
    fn request(&mut self, board: &[Token]) -> Token;
}

/// Chooses whatever an injected [`TokenPrompt`] produces.
///
/// The prompt may return a token that is not on the board; the engine then
/// re-prompts until a board-resident token is produced.
pub struct ManualChooser {
    prompt: Box<dyn TokenPrompt + Send>,
}

impl ManualChooser {
    /// Wraps the given prompt collaborator.
    pub fn new(prompt: Box<dyn TokenPrompt + Send>) -> ManualChooser {
        ManualChooser { prompt }
    }
}

impl TokenChooser for ManualChooser {
    fn choose(&mut self, board: &[Token]) -> Token {
        self.prompt.request(board)
    }
}

#[cfg(test)]
mod strategy_tests {
    use super::*;

    #[test]
    fn random_chooser_picks_from_the_board() {
        let board = [Token::Value(1), Token::Value(5), Token::Value(9)];
        let mut chooser = RandomChooser::seeded(7);
        for _ in 0..20 {
            assert!(board.contains(&chooser.choose(&board)));
        }
    }

    #[test]
    fn seeded_choosers_are_reproducible() {
        let board: Vec<Token> = (1..=20).map(Token::Value).collect();
        let mut first = RandomChooser::seeded(42);
        let mut second = RandomChooser::seeded(42);
        for _ in 0..10 {
            assert_eq!(first.choose(&board), second.choose(&board));
        }
    }

    #[test]
    fn greedy_chooser_prefers_the_wildcard() {
        let board = [Token::Value(3), Token::wildcard(), Token::Value(8)];
        let mut chooser = GreedyChooser::seeded(1);
        assert_eq!(chooser.choose(&board), Token::wildcard());
    }

    #[test]
    fn greedy_chooser_falls_back_to_random() {
        let board = [Token::Value(3), Token::Value(8)];
        let mut chooser = GreedyChooser::seeded(1);
        for _ in 0..10 {
            assert!(board.contains(&chooser.choose(&board)));
        }
    }

    #[test]
    fn manual_chooser_returns_whatever_the_prompt_says() {
        struct Fixed(Token);
        impl TokenPrompt for Fixed {
            fn request(&mut self, _board: &[Token]) -> Token {
                self.0
            }
        }

        let mut chooser = ManualChooser::new(Box::new(Fixed(Token::Value(99))));
        // Off-board answers are passed through; validation is the engine's job.
        assert_eq!(chooser.choose(&[Token::Value(1)]), Token::Value(99));
    }
}
