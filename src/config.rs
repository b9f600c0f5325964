//! Config for the game engine behaviors.
//!
//! Configuration can be created programmatically using [`GameConfig::new()`]
//! or by reading environment variables using [`GameConfig::from_env()`].
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override configuration
//! values. All values are optional and case-insensitive; set a flag to
//! `"true"` to enable it.
//!
//! - `GAME_VERBOSE` — Narrate turns, claims and the final ranking (default: `true`)
//! - `GAME_LOG` — Enable logging to a file (default: `false`)
//! - `GAME_SEED` — Seed for the first-turn draw, as a `u64` (default: unset)

/// Configuration for game engine behaviors.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) seed: Option<u64>,
}

impl GameConfig {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - The engine narrates turns, claims and the final ranking.
    /// - Logging to file is disabled.
    /// - No seed is set; the first turn is drawn from operating-system entropy.
    pub fn new() -> Self {
        Self {
            verbose: true,
            log: false,
            seed: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Recognized variables are `GAME_VERBOSE`, `GAME_LOG` and `GAME_SEED`;
    /// any other value (including unset) results in the default for each
    /// field.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        Self {
            verbose: get_env_flag("GAME_VERBOSE", true),
            log: get_env_flag("GAME_LOG", false),
            seed: std::env::var("GAME_SEED").ok().and_then(|s| s.parse().ok()),
        }
    }

    /// Enable or disable turn narration.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Fix the seed of the first-turn draw, making runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
