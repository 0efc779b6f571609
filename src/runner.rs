//! Headless autoplay - drives a [`Session`] with a simple move policy.
//!
//! Nothing here draws or reads input: it is a stand-in presentation layer that
//! only uses the session's public boundary (moves, reset, snapshots).

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::core::{Board, GameConfig, GameSnapshot};
use crate::engine::Session;
use crate::types::{Direction, GameStatus, MoveOutcome, SpawnPolicy, Tile};

/// Order tried by [`Strategy::Cycle`]
const CYCLE_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Up,
];

/// How the autoplayer picks its next direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Left, Down, Right, Up in rotation, skipping directions that change nothing
    Cycle,
    /// Uniformly random among directions that change the board
    Random,
    /// Highest immediate score, then most empty cells
    Greedy,
}

impl Strategy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cycle" => Some(Strategy::Cycle),
            "random" => Some(Strategy::Random),
            "greedy" => Some(Strategy::Greedy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Cycle => "cycle",
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
        }
    }
}

/// Picks directions for one [`Strategy`]
#[derive(Debug, Clone)]
pub struct Autoplayer {
    strategy: Strategy,
    rng: StdRng,
    cursor: usize,
}

impl Autoplayer {
    pub fn new(strategy: Strategy, seed: u64) -> Self {
        Self {
            strategy,
            rng: StdRng::seed_from_u64(seed),
            cursor: 0,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Choose the next direction for `board`
    ///
    /// Falls back to `Left` when no direction changes the board.
    pub fn choose(&mut self, board: &Board) -> Direction {
        match self.strategy {
            Strategy::Cycle => self.choose_cycle(board),
            Strategy::Random => {
                let legal = board.legal_moves();
                if legal.is_empty() {
                    Direction::Left
                } else {
                    legal[self.rng.gen_range(0..legal.len())]
                }
            }
            Strategy::Greedy => choose_greedy(board),
        }
    }

    fn choose_cycle(&mut self, board: &Board) -> Direction {
        for offset in 0..CYCLE_ORDER.len() {
            let slot = (self.cursor + offset) % CYCLE_ORDER.len();
            let dir = CYCLE_ORDER[slot];
            if board.can_slide(dir) {
                self.cursor = (slot + 1) % CYCLE_ORDER.len();
                return dir;
            }
        }
        Direction::Left
    }
}

fn choose_greedy(board: &Board) -> Direction {
    let mut best: Option<(Direction, u32, usize)> = None;
    for dir in Direction::ALL {
        let mut probe = *board;
        let result = probe.slide(dir);
        if !result.changed {
            continue;
        }
        let empty = probe.count_empty();
        let better = match best {
            None => true,
            Some((_, score, best_empty)) => {
                result.score > score || (result.score == score && empty > best_empty)
            }
        };
        if better {
            best = Some((dir, result.score, empty));
        }
    }
    best.map(|(dir, _, _)| dir).unwrap_or(Direction::Left)
}

/// Settings for a batch of autoplayed games
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    pub games: u32,
    pub game: GameConfig,
    pub strategy: Strategy,
    /// Stop a game after this many accepted moves even if it is still active
    pub max_moves: Option<u32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            games: 1,
            game: GameConfig::default(),
            strategy: Strategy::Greedy,
            max_moves: None,
        }
    }
}

/// Outcome of one autoplayed game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub episode_id: u32,
    pub score: u32,
    pub moves: u32,
    pub highest_tile: Tile,
    pub status: GameStatus,
}

impl From<&GameSnapshot> for GameSummary {
    fn from(snapshot: &GameSnapshot) -> Self {
        Self {
            episode_id: snapshot.episode_id,
            score: snapshot.score,
            moves: snapshot.moves,
            highest_tile: snapshot.highest_tile,
            status: snapshot.status,
        }
    }
}

/// Aggregate over a batch of games
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunStats {
    pub games: usize,
    pub mean_score: f64,
    pub best_score: u32,
    pub best_tile: Tile,
}

impl RunStats {
    pub fn from_summaries(summaries: &[GameSummary]) -> Self {
        let games = summaries.len();
        let total: u64 = summaries.iter().map(|s| s.score as u64).sum();
        Self {
            games,
            mean_score: if games == 0 {
                0.0
            } else {
                total as f64 / games as f64
            },
            best_score: summaries.iter().map(|s| s.score).max().unwrap_or(0),
            best_tile: summaries.iter().map(|s| s.highest_tile).max().unwrap_or(0),
        }
    }
}

/// Play the session's current episode until game over or `max_moves`
pub fn play_game(
    session: &Session,
    player: &mut Autoplayer,
    max_moves: Option<u32>,
) -> GameSummary {
    let spawn_policy = session.with_state(|state| state.config().spawn_policy);

    while session.status() == GameStatus::Active {
        if let Some(limit) = max_moves {
            if session.with_state(|state| state.moves()) >= limit {
                break;
            }
        }

        let dir = player.choose(&session.board_copy());
        match session.apply_move(dir) {
            MoveOutcome::Moved => {}
            // Nothing can change any more without a spawn.
            MoveOutcome::Unchanged if spawn_policy == SpawnPolicy::OnChange => break,
            MoveOutcome::Unchanged => {}
            MoveOutcome::GameOver | MoveOutcome::Busy => break,
        }
    }

    GameSummary::from(&session.snapshot())
}

/// Play `config.games` games on one session, resetting between games
///
/// `on_game` sees each finished game's summary and final snapshot; an error
/// from it stops the run.
pub fn run<E, F>(config: &RunConfig, mut on_game: F) -> Result<Vec<GameSummary>, E>
where
    F: FnMut(&GameSummary, &GameSnapshot) -> Result<(), E>,
{
    let session = Session::new(config.game);
    let mut player = Autoplayer::new(config.strategy, config.game.seed.wrapping_add(1));
    let mut summaries = Vec::with_capacity(config.games as usize);

    for game in 0..config.games {
        if game > 0 {
            session.reset();
        }

        let summary = play_game(&session, &mut player, config.max_moves);
        info!(
            "game {} ({}): score {}, {} moves, highest tile {}, {}",
            game + 1,
            config.strategy.as_str(),
            summary.score,
            summary.moves,
            summary.highest_tile,
            summary.status.as_str()
        );
        on_game(&summary, &session.snapshot())?;
        summaries.push(summary);
    }

    Ok(summaries)
}
