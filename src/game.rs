//! Core engine running a positional game.
//!
//! This module defines the [`Game`] aggregate, which owns the shared game
//! state and coordinates the player actors. Its responsibilities include:
//!
//! - Registering the roster before the game starts
//! - Seeding a random first turn and spawning one actor thread per player,
//!   plus the [`TimeKeeper`] countdown
//! - Enforcing the turn protocol: exactly one player may move at a time,
//!   strictly round-robin in registration order
//! - Committing claims atomically and deciding termination
//!
//! # Turn coordination
//!
//! All shared mutable state (board, claimed collections, turn holder) lives
//! behind one lock owned by the aggregate. Each actor blocks on a condition
//! variable and re-checks, on every wakeup, whether it holds the turn or the
//! game has finished: a guarded wait, immune to spurious wakeups. Whoever
//! advances or finishes the game broadcasts to all waiters.
//!
//! Blocking input (a [`ManualChooser`](crate::strategy::ManualChooser)
//! waiting on its prompt) happens outside the lock; the commit sequence
//! (verify-on-board, remove, assign, advance) is a single lock-held step.
//!
//! # Example
//!
//! See the crate-level documentation.

use std::collections::BTreeSet;
use std::mem;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::anyhow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::logger::init_logger;
use crate::player::Player;
use crate::scoring::{self, EdgeGraph};
use crate::strategy::TokenChooser;
use crate::time_keeper::TimeKeeper;
use crate::token::Token;

/// Which positional game is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    /// First to claim an arithmetic progression of the target length.
    Progression,
    /// First to claim the edges of a clique of the target size.
    Clique,
}

/// Lifecycle of a game. `Finished` is terminal and absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Constructed, roster still open, no one may move.
    NotStarted,
    /// Actors are running and exactly one player holds the turn.
    Running,
    /// Terminal: no one may move, ever again.
    Finished,
}

/// Why a finished game ended, in evaluation order: an empty board wins over
/// an expired clock, which wins over a reached objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// Every token has been claimed without anyone reaching the objective.
    BoardExhausted,
    /// The time keeper expired before anyone reached the objective.
    TimeExpired,
    /// The named player reached the objective with their latest claim.
    ObjectiveReached {
        /// Name of the winning player.
        winner: String,
    },
}

struct Seat {
    name: String,
    tokens: BTreeSet<Token>,
    graph: EdgeGraph,
}

struct GameState {
    phase: GamePhase,
    board: Board,
    seats: Vec<Seat>,
    current: Option<usize>,
    outcome: Option<GameOutcome>,
}

/// Engine core shared between the aggregate and the actor threads.
struct Shared {
    kind: GameKind,
    objective: usize,
    config: GameConfig,
    time_keeper: TimeKeeper,
    state: Mutex<GameState>,
    turns: Condvar,
}

/// Aggregate root of one positional game.
///
/// Constructed through [`Game::progression`] or [`Game::clique`], populated
/// with [`Game::add_players`], driven by [`Game::start`].
pub struct Game {
    shared: Arc<Shared>,
    choosers: Mutex<Vec<Box<dyn TokenChooser + Send>>>,
}

/// Handle over the actor threads of a started game, returned by
/// [`Game::start`]. Joins nothing when the game refused to start.
#[derive(Debug)]
pub struct GameHandle {
    workers: Vec<JoinHandle<()>>,
}

impl GameHandle {
    /// True if the game actually started and spawned its actors.
    pub fn started(&self) -> bool {
        !self.workers.is_empty()
    }

    /// Waits until every player actor has exited.
    ///
    /// # Errors
    /// Returned when a player thread panicked.
    pub fn join(self) -> anyhow::Result<()> {
        for worker in self.workers {
            worker
                .join()
                .map_err(|_| anyhow!("a player thread panicked"))?;
        }
        Ok(())
    }
}

impl Game {
    /// An arithmetic progression game: first to own `target_length` values in
    /// arithmetic progression (the blank wildcard counting one bonus point)
    /// wins.
    ///
    /// # Errors
    /// [`GameError::InvalidProgressionLength`] when `target_length < 1`,
    /// [`GameError::InvalidDuration`] when `duration` is zero.
    pub fn progression(
        board: Board,
        duration: Duration,
        target_length: usize,
        config: GameConfig,
    ) -> Result<Game, GameError> {
        if target_length < 1 {
            return Err(GameError::InvalidProgressionLength(target_length));
        }
        Game::with_kind(GameKind::Progression, target_length, board, duration, config)
    }

    /// A clique game: first to own all edges of a clique of `clique_size`
    /// nodes wins.
    ///
    /// # Errors
    /// [`GameError::InvalidCliqueSize`] when `clique_size < 2`,
    /// [`GameError::InvalidDuration`] when `duration` is zero.
    pub fn clique(
        board: Board,
        duration: Duration,
        clique_size: usize,
        config: GameConfig,
    ) -> Result<Game, GameError> {
        if clique_size < 2 {
            return Err(GameError::InvalidCliqueSize(clique_size));
        }
        Game::with_kind(GameKind::Clique, clique_size, board, duration, config)
    }

    fn with_kind(
        kind: GameKind,
        objective: usize,
        board: Board,
        duration: Duration,
        config: GameConfig,
    ) -> Result<Game, GameError> {
        let time_keeper = TimeKeeper::new(duration)?;
        if config.log {
            init_logger();
        }
        trace!(?kind, objective, ?duration, ?config);

        Ok(Game {
            shared: Arc::new(Shared {
                kind,
                objective,
                config,
                time_keeper,
                state: Mutex::new(GameState {
                    phase: GamePhase::NotStarted,
                    board,
                    seats: vec![],
                    current: None,
                    outcome: None,
                }),
                turns: Condvar::new(),
            }),
            choosers: Mutex::new(vec![]),
        })
    }

    /// Registers players, idempotently by name: a name already on the roster
    /// is skipped. Each new player gets an empty claimed-token collection.
    /// Once the game has started the roster is frozen and late additions are
    /// ignored with a warning.
    pub fn add_players(&self, players: impl IntoIterator<Item = Player>) {
        let mut state = self.shared.state.lock().expect("poisoned");
        if state.phase != GamePhase::NotStarted {
            warn!("the roster is frozen once the game has started");
            return;
        }
        let mut choosers = self.choosers.lock().expect("poisoned");
        for player in players {
            if state.seats.iter().any(|seat| seat.name == player.name) {
                debug!(player = %player.name, "already registered, skipping");
                continue;
            }
            let Player { name, chooser } = player;
            state.seats.push(Seat {
                name,
                tokens: BTreeSet::new(),
                graph: EdgeGraph::new(),
            });
            choosers.push(chooser);
        }
    }

    /// Unregisters a player by name.
    ///
    /// # Errors
    /// [`GameError::PlayerNotFound`] when the name is not on the roster,
    /// [`GameError::RosterFrozen`] once the game has started.
    pub fn remove_player(&self, name: &str) -> Result<(), GameError> {
        let mut state = self.shared.state.lock().expect("poisoned");
        if state.phase != GamePhase::NotStarted {
            return Err(GameError::RosterFrozen);
        }
        let index = state
            .seats
            .iter()
            .position(|seat| seat.name == name)
            .ok_or_else(|| GameError::PlayerNotFound(name.to_owned()))?;
        state.seats.remove(index);
        self.choosers.lock().expect("poisoned").remove(index);
        Ok(())
    }

    /// Starts the game: draws a random first turn, spawns one actor thread
    /// per player plus the time keeper, and returns a handle over the actors.
    ///
    /// The game needs at least two players; with fewer, this logs a warning,
    /// performs no state change and returns a handle that joins nothing.
    #[instrument(skip_all)]
    pub fn start(&self) -> GameHandle {
        let mut state = self.shared.state.lock().expect("poisoned");
        let mut choosers = self.choosers.lock().expect("poisoned");

        if state.phase != GamePhase::NotStarted {
            warn!("the game has already been started");
            return GameHandle { workers: vec![] };
        }
        if state.seats.len() < 2 {
            warn!("the game needs at least two players in order to start");
            return GameHandle { workers: vec![] };
        }

        self.shared.welcome();
        let first = self.shared.draw_first_turn(state.seats.len());
        state.phase = GamePhase::Running;
        state.current = Some(first);
        self.shared.narrate_turn(&state, first);

        let mut workers = Vec::with_capacity(state.seats.len());
        for (index, chooser) in mem::take(&mut *choosers).into_iter().enumerate() {
            let shared = Arc::clone(&self.shared);
            let worker = thread::Builder::new()
                .name(format!("player-{}", state.seats[index].name))
                .spawn(move || shared.run_player(index, chooser))
                .expect("could not spawn a player thread");
            workers.push(worker);
        }
        // The countdown is not joined: it sleeps out the full game duration
        // even when the game ends early.
        let _ = self.shared.time_keeper.spawn();

        GameHandle { workers }
    }

    /// Advances the turn state: evaluates termination, and either hands the
    /// turn to the next player in roster order or finishes the game,
    /// broadcasting to all waiting actors either way. Invoked by the acting
    /// player's actor after each successful claim; once the game is finished
    /// further calls change nothing.
    pub fn update(&self) {
        let mut state = self.shared.state.lock().expect("poisoned");
        self.shared.advance(&mut state);
    }

    /// The kind of game being played.
    pub fn kind(&self) -> GameKind {
        self.shared.kind
    }

    /// The objective threshold: target progression length or clique size.
    pub fn objective(&self) -> usize {
        self.shared.objective
    }

    /// The configured game duration.
    pub fn duration(&self) -> Duration {
        self.shared.time_keeper.limit()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.shared.state.lock().expect("poisoned").phase
    }

    /// Roster index of the player who may move, or `None` when no one may
    /// (not yet started, or finished).
    pub fn current_turn(&self) -> Option<usize> {
        self.shared.state.lock().expect("poisoned").current
    }

    /// The unclaimed tokens, in deterministic order.
    pub fn board_snapshot(&self) -> Vec<Token> {
        self.shared.state.lock().expect("poisoned").board.snapshot()
    }

    /// Player names in registration (turn) order.
    pub fn roster(&self) -> Vec<String> {
        self.shared
            .state
            .lock()
            .expect("poisoned")
            .seats
            .iter()
            .map(|seat| seat.name.clone())
            .collect()
    }

    /// The tokens claimed so far by the named player, in deterministic order.
    ///
    /// # Errors
    /// [`GameError::PlayerNotFound`] when the name is not on the roster.
    pub fn player_tokens(&self, name: &str) -> Result<Vec<Token>, GameError> {
        let state = self.shared.state.lock().expect("poisoned");
        let seat = state
            .seats
            .iter()
            .find(|seat| seat.name == name)
            .ok_or_else(|| GameError::PlayerNotFound(name.to_owned()))?;
        Ok(seat.tokens.iter().copied().collect())
    }

    /// Every player's current score, in roster order, independent of the
    /// objective threshold.
    pub fn ranking(&self) -> Vec<(String, usize)> {
        let state = self.shared.state.lock().expect("poisoned");
        state
            .seats
            .iter()
            .map(|seat| (seat.name.clone(), self.shared.seat_score(seat)))
            .collect()
    }

    /// How the game ended, or `None` while it has not.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.shared.state.lock().expect("poisoned").outcome.clone()
    }
}

impl Shared {
    fn draw_first_turn(&self, players: usize) -> usize {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        rng.random_range(0..players)
    }

    /// Actor body: repeatedly wait for the turn, claim one token, advance.
    fn run_player(&self, index: usize, mut chooser: Box<dyn TokenChooser + Send>) {
        loop {
            let Some(snapshot) = self.wait_turn(index) else {
                return;
            };
            if snapshot.is_empty() {
                // Only reachable when the game was started on an empty
                // board; let the termination check settle it.
                match self.state.lock() {
                    Ok(mut state) => self.advance(&mut state),
                    Err(_) => {
                        error!(player = index, "state lock poisoned on an empty board");
                        return;
                    }
                }
                continue;
            }
            let token = self.choose_token(&mut *chooser, &snapshot);
            self.take_turn(index, token);
        }
    }

    /// Blocks until `index` holds the turn, returning a board snapshot, or
    /// `None` when the game is over. A poisoned lock is fatal for this actor
    /// only: logged, `None`, the engine and the other actors keep going.
    fn wait_turn(&self, index: usize) -> Option<Vec<Token>> {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => {
                error!(player = index, "state lock poisoned while waiting for a turn");
                return None;
            }
        };
        while state.phase == GamePhase::Running && state.current != Some(index) {
            state = match self.turns.wait(state) {
                Ok(guard) => guard,
                Err(_) => {
                    error!(player = index, "state lock poisoned while waiting for a turn");
                    return None;
                }
            };
        }
        if state.phase != GamePhase::Running {
            return None;
        }
        Some(state.board.snapshot())
    }

    /// Asks the chooser until it names a token present in the snapshot.
    /// Only an interactive chooser can miss; the board cannot change while
    /// this player holds the turn.
    fn choose_token(&self, chooser: &mut dyn TokenChooser, snapshot: &[Token]) -> Token {
        let mut token = chooser.choose(snapshot);
        while !snapshot.contains(&token) {
            debug!(%token, "there is no such token on the board, choose again");
            token = chooser.choose(snapshot);
        }
        token
    }

    /// The commit sequence, one atomic lock-held step: verify the token is
    /// still on the board, remove it, assign it to the acting player, then
    /// advance or finish the turn state.
    fn take_turn(&self, index: usize, token: Token) {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => {
                error!(player = index, "state lock poisoned while committing a claim");
                return;
            }
        };
        if state.phase != GamePhase::Running || state.current != Some(index) {
            return;
        }
        if !state.board.remove_token(&token) {
            warn!(player = %state.seats[index].name, %token, "chosen token is no longer on the board");
            return;
        }
        if self.config.verbose {
            info!(player = %state.seats[index].name, %token, "token claimed");
        }
        add_token_to_player(&mut state, index, token);
        self.advance(&mut state);
    }

    fn advance(&self, state: &mut GameState) {
        if state.phase != GamePhase::Running {
            return;
        }
        if let Some(outcome) = self.check_game_over(state) {
            state.phase = GamePhase::Finished;
            state.current = None;
            match &outcome {
                GameOutcome::ObjectiveReached { winner } => {
                    info!(%winner, "game has ended")
                }
                GameOutcome::BoardExhausted | GameOutcome::TimeExpired => info!("game over"),
            }
            state.outcome = Some(outcome);
            self.narrate_ranking(state);
        } else {
            let next = state
                .current
                .map_or(0, |current| (current + 1) % state.seats.len());
            state.current = Some(next);
            self.narrate_turn(state, next);
        }
        self.turns.notify_all();
    }

    /// First true cause wins: empty board, then expired clock, then the
    /// acting player's score against the objective.
    fn check_game_over(&self, state: &GameState) -> Option<GameOutcome> {
        if state.board.is_empty() {
            return Some(GameOutcome::BoardExhausted);
        }
        if self.time_keeper.expired() {
            return Some(GameOutcome::TimeExpired);
        }
        let current = state.current?;
        let seat = &state.seats[current];
        if self.seat_score(seat) >= self.objective {
            return Some(GameOutcome::ObjectiveReached {
                winner: seat.name.clone(),
            });
        }
        None
    }

    fn seat_score(&self, seat: &Seat) -> usize {
        match self.kind {
            GameKind::Progression => scoring::progression_score(&seat.tokens),
            GameKind::Clique => seat.graph.largest_clique(),
        }
    }

    fn welcome(&self) {
        if !self.config.verbose {
            return;
        }
        match self.kind {
            GameKind::Progression => info!(
                objective = self.objective,
                "welcome to the arithmetic progression game"
            ),
            GameKind::Clique => info!(objective = self.objective, "welcome to the clique game"),
        }
    }

    fn narrate_turn(&self, state: &GameState, turn: usize) {
        if !self.config.verbose {
            return;
        }
        let seat = &state.seats[turn];
        info!(
            player = %seat.name,
            board = %state.board,
            tokens = ?seat.tokens,
            "turn starts"
        );
    }

    fn narrate_ranking(&self, state: &GameState) {
        if !self.config.verbose {
            return;
        }
        for seat in &state.seats {
            info!(player = %seat.name, points = self.seat_score(seat), "final score");
        }
    }
}

/// Appends a claimed token to a player's collection, growing the player's
/// private graph for edge tokens. Part of the lock-held commit sequence.
fn add_token_to_player(state: &mut GameState, index: usize, token: Token) {
    let seat = &mut state.seats[index];
    seat.tokens.insert(token);
    if let Token::Edge(a, b) = token {
        seat.graph.add_edge(a, b);
    }
}
