//! The countdown bounding a game's total duration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::info;

use crate::error::GameError;

/// Background countdown bounding the duration of a whole game.
///
/// The keeper runs on its own thread, started alongside the player actors,
/// and narrates the remaining time once per tick. Expiry is published exactly
/// once through a shared flag; the engine reads [`TimeKeeper::expired`] when
/// evaluating termination and never inspects thread liveness.
#[derive(Debug)]
pub struct TimeKeeper {
    limit: Duration,
    expired: Arc<AtomicBool>,
}

/// Remaining time is narrated at most this often.
const TICK: Duration = Duration::from_secs(60);

impl TimeKeeper {
    /// A keeper for the given game duration.
    ///
    /// # Errors
    /// Returns [`GameError::InvalidDuration`] for a zero duration.
    pub fn new(limit: Duration) -> Result<TimeKeeper, GameError> {
        if limit.is_zero() {
            return Err(GameError::InvalidDuration);
        }
        Ok(TimeKeeper {
            limit,
            expired: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The configured game duration.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// True once the game duration has fully elapsed.
    pub fn expired(&self) -> bool {
        self.expired.load(Ordering::Acquire)
    }

    /// Starts the countdown thread. Will panic if the thread cannot spawn.
    pub(crate) fn spawn(&self) -> JoinHandle<()> {
        let limit = self.limit;
        let expired = Arc::clone(&self.expired);
        thread::Builder::new()
            .name("time-keeper".to_owned())
            .spawn(move || {
                let mut remaining = limit;
                while !remaining.is_zero() {
                    let step = remaining.min(TICK);
                    thread::sleep(step);
                    remaining -= step;
                    if !remaining.is_zero() {
                        info!(?remaining, "game clock is running");
                    }
                }
                expired.store(true, Ordering::Release);
                info!("time limit exceeded, this game will be over soon");
            })
            .expect("could not spawn the time keeper thread")
    }
}

#[cfg(test)]
mod time_keeper_tests {
    use super::*;

    #[test]
    fn zero_duration_is_rejected() {
        assert!(matches!(
            TimeKeeper::new(Duration::ZERO),
            Err(GameError::InvalidDuration)
        ));
    }

    #[test]
    fn expires_after_the_limit() {
        let keeper = TimeKeeper::new(Duration::from_millis(20)).unwrap();
        assert!(!keeper.expired());
        keeper.spawn().join().unwrap();
        assert!(keeper.expired());
    }
}
