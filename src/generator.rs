//! Builders for the initial token pool.
//!
//! A [`TokenFactory`] produces the board contents before a
//! [`Game`](crate::game::Game) is constructed: a random subset of distinct
//! values for the progression game, or the complete edge set over a number of
//! labeled nodes for the clique game.

use anyhow::bail;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::Board;
use crate::token::Token;

/// Produces the initial board contents of a game.
pub trait TokenFactory {
    /// Returns a freshly populated board.
    ///
    /// # Errors
    /// Returned when the requested pool cannot be produced.
    fn make_board(&mut self) -> anyhow::Result<Board>;
}

/// Draws `count` distinct scalar tokens from the values `0..=max_value`.
///
/// The wildcard value 0 takes part in the draw like any other value.
#[derive(Debug, Clone)]
pub struct ValuePool {
    count: usize,
    max_value: u32,
    seed: Option<u64>,
}

impl ValuePool {
    /// A pool of `count` distinct values drawn from `[0, max_value]`.
    pub fn new(count: usize, max_value: u32) -> ValuePool {
        ValuePool {
            count,
            max_value,
            seed: None,
        }
    }

    /// Fix the draw seed, making the pool reproducible.
    pub fn with_seed(mut self, seed: u64) -> ValuePool {
        self.seed = Some(seed);
        self
    }
}

impl TokenFactory for ValuePool {
    fn make_board(&mut self) -> anyhow::Result<Board> {
        if self.count > self.max_value as usize + 1 {
            bail!(
                "cannot draw {} distinct values from 0..={}",
                self.count,
                self.max_value
            );
        }
        let mut values: Vec<u32> = (0..=self.max_value).collect();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        values.shuffle(&mut rng);
        Ok(Board::new(values.into_iter().take(self.count).map(Token::Value)))
    }
}

/// All edges between `nodes` labeled nodes, labels `1..=nodes`.
#[derive(Debug, Clone, Copy)]
pub struct CompleteGraph {
    nodes: u32,
}

impl CompleteGraph {
    /// The complete edge set over the given number of nodes.
    pub fn new(nodes: u32) -> CompleteGraph {
        CompleteGraph { nodes }
    }
}

impl TokenFactory for CompleteGraph {
    fn make_board(&mut self) -> anyhow::Result<Board> {
        if self.nodes < 2 {
            bail!("a complete graph needs at least two nodes, got {}", self.nodes);
        }
        let mut tokens = Vec::new();
        for a in 1..self.nodes {
            for b in (a + 1)..=self.nodes {
                tokens.push(Token::edge(a, b));
            }
        }
        Ok(Board::new(tokens))
    }
}

#[cfg(test)]
mod generator_tests {
    use super::*;

    #[test]
    fn value_pool_draws_distinct_values_in_range() {
        let board = ValuePool::new(10, 15).with_seed(3).make_board().unwrap();
        assert_eq!(board.len(), 10);
        for token in board.iter() {
            match token {
                Token::Value(v) => assert!(*v <= 15),
                Token::Edge(..) => panic!("value pool produced an edge"),
            }
        }
    }

    #[test]
    fn value_pool_is_reproducible_with_a_seed() {
        let first = ValuePool::new(8, 20).with_seed(11).make_board().unwrap();
        let second = ValuePool::new(8, 20).with_seed(11).make_board().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn value_pool_rejects_impossible_draws() {
        assert!(ValuePool::new(17, 15).make_board().is_err());
    }

    #[test]
    fn complete_graph_has_all_edges() {
        let board = CompleteGraph::new(8).make_board().unwrap();
        assert_eq!(board.len(), 8 * 7 / 2);
        assert!(board.contains(&Token::edge(1, 8)));
        assert!(!board.contains(&Token::edge(1, 1)));
    }

    #[test]
    fn complete_graph_needs_two_nodes() {
        assert!(CompleteGraph::new(1).make_board().is_err());
    }
}
