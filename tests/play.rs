use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use positional_games::prelude::*;
use positional_games::scoring::EdgeGraph;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn init_test_logger() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Scripted stand-in for interactive input: plays its script, then falls
/// back to the first token on the board. Optionally sleeps before answering.
struct ScriptedPrompt {
    script: VecDeque<Token>,
    delay: Option<Duration>,
}

impl ScriptedPrompt {
    fn new(script: impl IntoIterator<Item = Token>) -> ScriptedPrompt {
        ScriptedPrompt {
            script: script.into_iter().collect(),
            delay: None,
        }
    }

    fn slow(delay: Duration) -> ScriptedPrompt {
        ScriptedPrompt {
            script: VecDeque::new(),
            delay: Some(delay),
        }
    }
}

impl TokenPrompt for ScriptedPrompt {
    fn request(&mut self, board: &[Token]) -> Token {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.script.pop_front().unwrap_or(board[0])
    }
}

fn conserved_tokens(game: &Game, initial: usize) {
    let owned: usize = game
        .roster()
        .iter()
        .map(|name| game.player_tokens(name).unwrap().len())
        .sum();
    assert_eq!(game.board_snapshot().len() + owned, initial);
}

#[test]
fn progression_game_runs_to_completion() -> anyhow::Result<()> {
    init_test_logger();

    let board = ValuePool::new(10, 15).with_seed(4).make_board()?;
    let initial = board.len();
    let config = GameConfig::new().with_seed(21);
    let game = Game::progression(board, Duration::from_secs(300), 4, config)?;

    game.add_players([
        Player::new("ana", Box::new(RandomChooser::seeded(1))),
        Player::new("bogdan", Box::new(GreedyChooser::seeded(2))),
        Player::new("carmen", Box::new(RandomChooser::seeded(3))),
    ]);
    let handle = game.start();
    assert!(handle.started());
    handle.join()?;

    assert_eq!(game.phase(), GamePhase::Finished);
    assert_eq!(game.current_turn(), None);
    conserved_tokens(&game, initial);

    let ranking = game.ranking();
    assert_eq!(ranking.len(), 3);
    match game.outcome() {
        Some(GameOutcome::ObjectiveReached { winner }) => {
            let (_, points) = ranking
                .iter()
                .find(|(name, _)| *name == winner)
                .expect("winner is on the roster");
            assert!(*points >= game.objective());
        }
        Some(GameOutcome::BoardExhausted) => assert!(game.board_snapshot().is_empty()),
        other => panic!("unexpected outcome: {other:?}"),
    }
    Ok(())
}

#[test]
fn clique_game_runs_to_completion() -> anyhow::Result<()> {
    init_test_logger();

    let board = CompleteGraph::new(5).make_board()?;
    let initial = board.len();
    let config = GameConfig::new().with_seed(8).with_verbose(false);
    let game = Game::clique(board, Duration::from_secs(300), 3, config)?;

    game.add_players([
        Player::new("ana", Box::new(RandomChooser::seeded(11))),
        Player::new("bogdan", Box::new(RandomChooser::seeded(12))),
    ]);
    game.start().join()?;

    assert_eq!(game.phase(), GamePhase::Finished);
    conserved_tokens(&game, initial);

    if let Some(GameOutcome::ObjectiveReached { winner }) = game.outcome() {
        let mut graph = EdgeGraph::new();
        for token in game.player_tokens(&winner)? {
            if let Token::Edge(a, b) = token {
                graph.add_edge(a, b);
            }
        }
        assert!(graph.largest_clique() >= 3);
    }
    Ok(())
}

#[test]
fn first_claim_wins_a_trivial_objective() -> anyhow::Result<()> {
    let board = Board::new((1..=6).map(Token::Value));
    let config = GameConfig::new().with_verbose(false);
    let game = Game::progression(board, Duration::from_secs(300), 1, config)?;

    game.add_players([
        Player::new("ana", Box::new(RandomChooser::seeded(31))),
        Player::new("bogdan", Box::new(RandomChooser::seeded(32))),
    ]);
    game.start().join()?;

    let Some(GameOutcome::ObjectiveReached { winner }) = game.outcome() else {
        panic!("a single claim should reach objective 1");
    };
    assert!(game.roster().contains(&winner));
    assert_eq!(game.player_tokens(&winner)?.len(), 1);
    let total_claimed: usize = game
        .roster()
        .iter()
        .map(|name| game.player_tokens(name).unwrap().len())
        .sum();
    assert_eq!(total_claimed, 1);
    Ok(())
}

#[test]
fn slow_players_lose_to_the_clock() -> anyhow::Result<()> {
    let board = Board::new((1..=50).map(Token::Value));
    let config = GameConfig::new().with_verbose(false);
    let game = Game::progression(board, Duration::from_millis(50), 40, config)?;

    game.add_players([
        Player::manual("ana", Box::new(ScriptedPrompt::slow(Duration::from_millis(25)))),
        Player::manual("bogdan", Box::new(ScriptedPrompt::slow(Duration::from_millis(25)))),
    ]);
    game.start().join()?;

    assert_eq!(game.phase(), GamePhase::Finished);
    assert_eq!(game.outcome(), Some(GameOutcome::TimeExpired));
    Ok(())
}

#[test]
fn off_board_choices_are_retried_not_committed() -> anyhow::Result<()> {
    let board = Board::new((1..=4).map(Token::Value));
    let initial = board.len();
    let config = GameConfig::new().with_verbose(false);
    let game = Game::progression(board, Duration::from_secs(300), 100, config)?;

    // Both players first ask for a token that was never on the board.
    game.add_players([
        Player::manual("ana", Box::new(ScriptedPrompt::new([Token::Value(77)]))),
        Player::manual("bogdan", Box::new(ScriptedPrompt::new([Token::Value(88)]))),
    ]);
    game.start().join()?;

    assert_eq!(game.phase(), GamePhase::Finished);
    assert_eq!(game.outcome(), Some(GameOutcome::BoardExhausted));
    conserved_tokens(&game, initial);
    for name in game.roster() {
        for token in game.player_tokens(&name)? {
            assert!(matches!(token, Token::Value(v) if v <= 4));
        }
    }
    Ok(())
}
