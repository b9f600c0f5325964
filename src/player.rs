//! Players: a name plus an injected token-choice capability.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::strategy::{GreedyChooser, ManualChooser, RandomChooser, TokenChooser, TokenPrompt};

/// A participant of a positional game.
///
/// Identity is the name: two players with the same name are the same player,
/// whatever their choosers. The chooser is an injected capability object,
/// moved into the player's actor thread when the game starts.
pub struct Player {
    pub(crate) name: String,
    pub(crate) chooser: Box<dyn TokenChooser + Send>,
}

impl Player {
    /// A player driven by the given chooser.
    pub fn new(name: impl Into<String>, chooser: Box<dyn TokenChooser + Send>) -> Player {
        Player {
            name: name.into(),
            chooser,
        }
    }

    /// A player picking tokens uniformly at random.
    pub fn random(name: impl Into<String>) -> Player {
        Player::new(name, Box::new(RandomChooser::new()))
    }

    /// A player grabbing the wildcard first, then picking randomly.
    pub fn greedy(name: impl Into<String>) -> Player {
        Player::new(name, Box::new(GreedyChooser::new()))
    }

    /// A player whose choices come from an external prompt collaborator.
    pub fn manual(name: impl Into<String>, prompt: Box<dyn TokenPrompt + Send>) -> Player {
        Player::new(name, Box::new(ManualChooser::new(prompt)))
    }

    /// The player's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod player_tests {
    use super::*;

    #[test]
    fn identity_is_the_name() {
        assert_eq!(Player::random("ana"), Player::greedy("ana"));
        assert_ne!(Player::random("ana"), Player::random("bogdan"));
    }
}
